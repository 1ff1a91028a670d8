// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use lifespan_core::entry::EntryState;
use lifespan_core::trace::{TraceSink, TransitionEvent, UpdateBeginEvent, UpdateSummary};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    precision: usize,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            precision: 3,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            precision: 3,
        }
    }

    /// Sets the number of decimals used for range bounds.
    #[must_use]
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn state_name(state: EntryState) -> &'static str {
    match state {
        EntryState::New => "new",
        EntryState::Future => "future",
        EntryState::Current => "current",
        EntryState::Past => "past",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_update_begin(&mut self, e: &UpdateBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[update] #{} range=[{:.p$}, {:.p$}] pending={} alive={} future={} past={}",
            e.update_index,
            e.range_start,
            e.range_end,
            e.pending,
            e.active,
            e.future,
            e.past,
            p = self.precision,
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[transition] #{} {:?} {} -> {}",
            e.update_index,
            e.entry,
            state_name(e.from),
            state_name(e.to),
        );
    }

    fn on_update_summary(&mut self, s: &UpdateSummary) {
        let changed = if s.changed { "yes" } else { "no" };
        let _ = writeln!(
            self.writer,
            "[summary] #{} alive={} changed={changed} checked={} drained={} \
             +alive={} -dead={} crossings={}",
            s.update_index,
            s.alive,
            s.stats.entries_checked,
            s.stats.pending_drained,
            s.stats.became_alive,
            s.stats.became_dead,
            s.stats.boundary_crossings,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifespan_core::entry::LifetimeEntry;
    use lifespan_core::event::NoopObserver;
    use lifespan_core::manager::{LifetimeManager, UpdateStats};
    use lifespan_core::trace::Tracer;

    #[test]
    fn pretty_print_update_begin() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).precision(1);
        sink.on_update_begin(&UpdateBeginEvent {
            update_index: 1,
            range_start: 2.5,
            range_end: 4.0,
            pending: 3,
            active: 0,
            future: 0,
            past: 0,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            "[update] #1 range=[2.5, 4.0] pending=3 alive=0 future=0 past=0\n"
        );
    }

    #[test]
    fn pretty_print_summary() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_update_summary(&UpdateSummary {
            update_index: 9,
            range_start: 0.0,
            range_end: 0.0,
            stats: UpdateStats {
                became_alive: 2,
                ..UpdateStats::default()
            },
            alive: 2,
            changed: true,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("[summary] #9"), "got: {output}");
        assert!(output.contains("changed=yes"), "got: {output}");
        assert!(output.contains("+alive=2"), "got: {output}");
    }

    #[test]
    fn traced_update_prints_transitions() {
        let mut manager = LifetimeManager::new();
        let id = manager.add_entry(LifetimeEntry::new(1.0, 2.0));
        manager.update_at(0.0, &mut NoopObserver);

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        manager.update_traced(1.5, 1.5, &mut NoopObserver, &mut Tracer::new(&mut sink));

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3, "got: {output}");
        assert!(lines[0].starts_with("[update] #2"), "got: {output}");
        assert_eq!(lines[1], format!("[transition] #2 {id:?} future -> current"));
        assert!(lines[2].starts_with("[summary] #2 alive=1"), "got: {output}");
    }
}
