// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for lifetime updates.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`LifetimeManager::update_traced`](crate::manager::LifetimeManager::update_traced)
//! calls at each stage of an update. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates per-entry [`TransitionEvent`]s
//!   and the corresponding `TraceSink` method.

#[cfg(feature = "trace-rich")]
use crate::entry::{EntryId, EntryState};
use crate::manager::UpdateStats;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when an update pass starts, before any entry is reclassified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateBeginEvent {
    /// Monotonic update counter of the emitting manager.
    pub update_index: u64,
    /// Start of the range being processed.
    pub range_start: f64,
    /// End of the range being processed, after clamping to `>= range_start`.
    pub range_end: f64,
    /// Entries waiting in the pending group.
    pub pending: u32,
    /// Entries currently alive.
    pub active: u32,
    /// Entries in the future group.
    pub future: u32,
    /// Entries in the past group.
    pub past: u32,
}

/// Emitted for every state change of a single entry.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    /// Update counter.
    pub update_index: u64,
    /// The entry that changed.
    pub entry: EntryId,
    /// Classification before the update.
    pub from: EntryState,
    /// Classification after the update.
    pub to: EntryState,
}

/// Per-update summary, emitted after the event queue has been drained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateSummary {
    /// Update counter.
    pub update_index: u64,
    /// Start of the processed range.
    pub range_start: f64,
    /// End of the processed range.
    pub range_end: f64,
    /// Counters collected during the pass.
    pub stats: UpdateStats,
    /// Entries alive after the pass.
    pub alive: u32,
    /// Whether any entry entered or left the alive set.
    pub changed: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from lifetime updates.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an update pass begins.
    fn on_update_begin(&mut self, e: &UpdateBeginEvent) {
        _ = e;
    }

    /// Called for every entry transition (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called with the summary of a finished update pass.
    fn on_update_summary(&mut self, s: &UpdateSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Returns whether events reach a sink.
    ///
    /// Always `false` without the `trace` feature.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits an [`UpdateBeginEvent`].
    #[inline]
    pub fn update_begin(&mut self, e: &UpdateBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_update_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        if let Some(s) = &mut self.sink {
            s.on_transition(e);
        }
    }

    /// Emits an [`UpdateSummary`].
    #[inline]
    pub fn update_summary(&mut self, s: &UpdateSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_update_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
