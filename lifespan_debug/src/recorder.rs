// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Range bounds are stored as the raw bits of their `f64`, so infinities and
//! `-0.0` survive a recording unchanged.

use lifespan_core::entry::EntryState;
use lifespan_core::manager::UpdateStats;
use lifespan_core::trace::{TraceSink, TransitionEvent, UpdateBeginEvent, UpdateSummary};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_UPDATE_BEGIN: u8 = 1;
const TAG_TRANSITION: u8 = 2;
const TAG_UPDATE_SUMMARY: u8 = 3;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_state(&mut self, s: EntryState) {
        self.write_u8(match s {
            EntryState::New => 0,
            EntryState::Future => 1,
            EntryState::Current => 2,
            EntryState::Past => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_update_begin(&mut self, e: &UpdateBeginEvent) {
        self.write_u8(TAG_UPDATE_BEGIN);
        self.write_u64(e.update_index);
        self.write_f64(e.range_start);
        self.write_f64(e.range_end);
        self.write_u32(e.pending);
        self.write_u32(e.active);
        self.write_u32(e.future);
        self.write_u32(e.past);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.write_u8(TAG_TRANSITION);
        self.write_u64(e.update_index);
        self.write_u32(e.entry.index());
        self.write_u32(e.entry.generation());
        self.write_state(e.from);
        self.write_state(e.to);
    }

    fn on_update_summary(&mut self, s: &UpdateSummary) {
        self.write_u8(TAG_UPDATE_SUMMARY);
        self.write_u64(s.update_index);
        self.write_f64(s.range_start);
        self.write_f64(s.range_end);
        self.write_u32(s.stats.entries_checked);
        self.write_u32(s.stats.pending_drained);
        self.write_u32(s.stats.became_alive);
        self.write_u32(s.stats.became_dead);
        self.write_u32(s.stats.boundary_crossings);
        self.write_u32(s.alive);
        self.write_u8(u8::from(s.changed));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A transition read back from a recording.
///
/// Entry handles are only meaningful to the manager that issued them, so the
/// recording keeps their raw parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedTransition {
    /// Update counter.
    pub update_index: u64,
    /// Slot index of the entry.
    pub entry_index: u32,
    /// Generation of the entry handle.
    pub entry_generation: u32,
    /// Classification before the update.
    pub from: EntryState,
    /// Classification after the update.
    pub to: EntryState,
}

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// An [`UpdateBeginEvent`].
    UpdateBegin(UpdateBeginEvent),
    /// A [`TransitionEvent`], with the handle split into its raw parts.
    Transition(RecordedTransition),
    /// An [`UpdateSummary`].
    UpdateSummary(UpdateSummary),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_state(&mut self) -> Option<EntryState> {
        Some(match self.read_u8()? {
            0 => EntryState::New,
            1 => EntryState::Future,
            2 => EntryState::Current,
            3 => EntryState::Past,
            _ => return None,
        })
    }

    fn decode_update_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::UpdateBegin(UpdateBeginEvent {
            update_index: self.read_u64()?,
            range_start: self.read_f64()?,
            range_end: self.read_f64()?,
            pending: self.read_u32()?,
            active: self.read_u32()?,
            future: self.read_u32()?,
            past: self.read_u32()?,
        }))
    }

    fn decode_transition(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Transition(RecordedTransition {
            update_index: self.read_u64()?,
            entry_index: self.read_u32()?,
            entry_generation: self.read_u32()?,
            from: self.read_state()?,
            to: self.read_state()?,
        }))
    }

    fn decode_update_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::UpdateSummary(UpdateSummary {
            update_index: self.read_u64()?,
            range_start: self.read_f64()?,
            range_end: self.read_f64()?,
            stats: UpdateStats {
                entries_checked: self.read_u32()?,
                pending_drained: self.read_u32()?,
                became_alive: self.read_u32()?,
                became_dead: self.read_u32()?,
                boundary_crossings: self.read_u32()?,
            },
            alive: self.read_u32()?,
            changed: self.read_u8()? != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_UPDATE_BEGIN => self.decode_update_begin(),
            TAG_TRANSITION => self.decode_transition(),
            TAG_UPDATE_SUMMARY => self.decode_update_summary(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lifespan_core::entry::LifetimeEntry;
    use lifespan_core::event::NoopObserver;
    use lifespan_core::manager::LifetimeManager;
    use lifespan_core::trace::Tracer;

    fn record_session() -> (Vec<u8>, LifetimeManager) {
        let mut manager = LifetimeManager::new();
        manager.add_entry(LifetimeEntry::new(0.0, 10.0));
        manager.add_entry(LifetimeEntry::new(5.0, 15.0));

        let mut rec = RecorderSink::new();
        let mut tracer = Tracer::new(&mut rec);
        manager.update_traced(0.0, 0.0, &mut NoopObserver, &mut tracer);
        manager.update_traced(12.0, 12.0, &mut NoopObserver, &mut tracer);
        drop(tracer);
        (rec.into_bytes(), manager)
    }

    #[test]
    fn records_a_traced_session() {
        let (bytes, manager) = record_session();
        let events: Vec<_> = decode(&bytes).collect();

        // Update 1: begin, New -> Current, New -> Future, summary.
        // Update 2: begin, Future -> Current, Current -> Past, summary.
        assert_eq!(events.len(), 8, "got: {events:#?}");
        assert!(matches!(events[0], RecordedEvent::UpdateBegin(ref e) if e.pending == 2));
        match &events[5] {
            RecordedEvent::Transition(t) => {
                assert_eq!(t.update_index, 2);
                assert_eq!(t.entry_index, 1);
                assert_eq!(t.from, EntryState::Future);
                assert_eq!(t.to, EntryState::Current);
            }
            other => panic!("expected Transition, got {other:?}"),
        }
        match &events[7] {
            RecordedEvent::UpdateSummary(s) => {
                assert_eq!(s.update_index, 2);
                assert_eq!(s.range_start, 12.0);
                assert_eq!(s.stats, manager.last_update_stats());
                assert_eq!(s.alive, 1);
                assert!(s.changed);
            }
            other => panic!("expected UpdateSummary, got {other:?}"),
        }
    }

    #[test]
    fn infinite_bounds_survive() {
        let mut rec = RecorderSink::new();
        rec.on_update_begin(&UpdateBeginEvent {
            update_index: 1,
            range_start: f64::NEG_INFINITY,
            range_end: f64::INFINITY,
            pending: 0,
            active: 0,
            future: 0,
            past: 0,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        match &events[..] {
            [RecordedEvent::UpdateBegin(e)] => {
                assert_eq!(e.range_start, f64::NEG_INFINITY);
                assert_eq!(e.range_end, f64::INFINITY);
            }
            other => panic!("expected one UpdateBegin, got {other:?}"),
        }
    }

    #[test]
    fn truncated_recording_stops_cleanly() {
        let (bytes, _) = record_session();
        let full = decode(&bytes).count();
        let cut = decode(&bytes[..bytes.len() - 1]).count();
        assert_eq!(cut, full - 1);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let (mut bytes, _) = record_session();
        let full = decode(&bytes).count();
        bytes.push(0xff);
        bytes.extend_from_slice(&[0; 16]);
        assert_eq!(decode(&bytes).count(), full);
    }
}
