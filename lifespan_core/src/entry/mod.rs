// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry data model.
//!
//! An *entry* is one interval whose aliveness the manager tracks. Each entry
//! has:
//!
//! - An identity ([`EntryId`]) — a generational handle that becomes stale when
//!   the entry is removed, so a recycled slot is never mistaken for the
//!   entry that used to live there.
//! - Bounds ([`LifetimeEntry`]) — the half-open `[start, end)` interval,
//!   normalized so that `end >= start`.
//! - A classification ([`EntryState`]) relative to the last processed range.
//! - A registration sequence number, used only to break ties between entries
//!   with equal bounds so that ordering never depends on slot reuse.

mod id;
mod interval;
mod state;

pub use id::EntryId;
pub use interval::LifetimeEntry;
pub use state::EntryState;
