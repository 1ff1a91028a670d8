// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each update becomes a `B`/`E` slice on thread 0 placed at its range start.
//! Transitions become instant events on a per-entry thread, numbered from the
//! entry's slot index plus one, so every entry gets its own lane in the viewer.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Range bounds are converted to trace microseconds by multiplying with
/// `us_per_unit` (e.g. `1000.0` when the timeline is in milliseconds).
/// Non-finite bounds are exported as `0`.
pub fn export(bytes: &[u8], us_per_unit: f64, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    // Transitions carry no time of their own; they belong to the open update.
    let mut current_ts = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::UpdateBegin(e) => {
                current_ts = to_us(e.range_start, us_per_unit);
                events.push(json!({
                    "ph": "B",
                    "name": "Update",
                    "cat": "Lifetime",
                    "ts": current_ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "update_index": e.update_index,
                        "range_end": to_us(e.range_end, us_per_unit),
                        "pending": e.pending,
                        "alive": e.active,
                        "future": e.future,
                        "past": e.past,
                    }
                }));
            }
            RecordedEvent::Transition(t) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?} -> {:?}", t.from, t.to),
                    "cat": "Transition",
                    "ts": current_ts,
                    "pid": 0,
                    "tid": u64::from(t.entry_index) + 1,
                    "s": "t",
                    "args": {
                        "update_index": t.update_index,
                        "entry": t.entry_index,
                        "generation": t.entry_generation,
                    }
                }));
            }
            RecordedEvent::UpdateSummary(s) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Update",
                    "cat": "Lifetime",
                    "ts": to_us(s.range_start, us_per_unit),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "update_index": s.update_index,
                        "alive": s.alive,
                        "changed": s.changed,
                        "entries_checked": s.stats.entries_checked,
                        "pending_drained": s.stats.pending_drained,
                        "became_alive": s.stats.became_alive,
                        "became_dead": s.stats.became_dead,
                        "boundary_crossings": s.stats.boundary_crossings,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_us(time: f64, us_per_unit: f64) -> f64 {
    let us = time * us_per_unit;
    if us.is_finite() { us } else { 0.0 }
}
