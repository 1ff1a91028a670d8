// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-windowed lifetime scheduling.
//!
//! `lifespan_core` decides which of a large set of time-bounded entries are
//! alive for the current time range, and reports every transition and every
//! boundary crossing. It is `no_std` compatible (with `alloc`) and stores
//! entries in struct-of-arrays form behind generational handles.
//!
//! # Architecture
//!
//! An update turns a time range into a batch of ordered notifications:
//!
//! ```text
//!   add_entry / set_start / set_end
//!       │
//!       ▼
//!   pending ──► LifetimeManager::update(range) ──► future / active / past
//!                         │
//!                         ▼
//!                    EventQueue ──► LifetimeObserver callbacks
//!                                          │
//!                 ┌────────────────────────┘
//!                 ▼
//!   add / remove / re-bound (applied by the next update)
//! ```
//!
//! **[`entry`]** — Interval bounds, classification states, and generational
//! handles.
//!
//! **[`manager`]** — The scheduler. Dormant entries sit in two ordered groups
//! and are only touched when the range reaches them, so an update costs
//! `O(pending + transitioned + alive)` rather than `O(total)`.
//!
//! **[`boundary`]** — Which bound of an interval was crossed, and in which
//! direction.
//!
//! **[`event`]** — The queued [`LifetimeEvent`](event::LifetimeEvent) and the
//! [`LifetimeObserver`](event::LifetimeObserver) trait that receives it.
//!
//! **[`container`]** — [`LifetimeContainer`](container::LifetimeContainer),
//! which owns one payload per entry and keeps the alive set in insertion
//! order.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! update instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-entry
//!   transition events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod boundary;
pub mod container;
pub mod entry;
pub mod event;
pub mod manager;
pub mod trace;
