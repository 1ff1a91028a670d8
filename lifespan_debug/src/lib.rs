// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for lifespan
//! diagnostics.
//!
//! This crate provides [`TraceSink`](lifespan_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//! - [`Tee`] — forwards every event to two sinks.

use lifespan_core::trace::{TraceSink, TransitionEvent, UpdateBeginEvent, UpdateSummary};

pub mod chrome;
pub mod pretty;
pub mod recorder;

/// A [`TraceSink`] that forwards every event to two sinks in order.
#[derive(Debug)]
pub struct Tee<A, B> {
    /// Receives each event first.
    pub first: A,
    /// Receives each event second.
    pub second: B,
}

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_update_begin(&mut self, e: &UpdateBeginEvent) {
        self.first.on_update_begin(e);
        self.second.on_update_begin(e);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.first.on_transition(e);
        self.second.on_transition(e);
    }

    fn on_update_summary(&mut self, s: &UpdateSummary) {
        self.first.on_update_summary(s);
        self.second.on_update_summary(s);
    }
}
