// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated playback that exercises the tracing and diagnostics pipeline.
//!
//! Plays a subtitle timeline forward at 60 Hz, scrubs back, then replays it in
//! forward-only mode. Events go to both a
//! [`PrettyPrintSink`](lifespan_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](lifespan_debug::recorder::RecorderSink); the recording is
//! exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use lifespan_core::container::{ContainerConfig, LifetimeChanges, LifetimeContainer};
use lifespan_core::entry::LifetimeEntry;
use lifespan_core::trace::Tracer;

use lifespan_debug::Tee;
use lifespan_debug::pretty::PrettyPrintSink;
use lifespan_debug::recorder::RecorderSink;

/// Frame interval in seconds (≈60 Hz).
const FRAME_INTERVAL: f64 = 1.0 / 60.0;
/// Length of the forward pass in seconds.
const PLAY_SECONDS: f64 = 4.0;
/// Trace microseconds per timeline second.
const US_PER_SECOND: f64 = 1_000_000.0;

const SUBTITLES: &[(f64, f64, &str)] = &[
    (0.20, 1.40, "Where were we?"),
    (1.10, 2.30, "Right about here."),
    (2.00, 2.01, "(click)"),
    (2.50, 3.60, "Let's go back."),
    (3.00, 3.00, "[marker]"),
];

fn main() {
    let mut sink = Tee {
        first: PrettyPrintSink::new(Box::new(std::io::stdout())),
        second: RecorderSink::new(),
    };

    // -- forward playback then scrub ----------------------------------------
    let mut timeline = LifetimeContainer::new(ContainerConfig::rewindable());
    load(&mut timeline);

    let mut frame: u32 = 0;
    let mut previous = 0.0;
    loop {
        let now = f64::from(frame) * FRAME_INTERVAL;
        if now > PLAY_SECONDS {
            break;
        }
        // The whole frame interval, so sub-frame blips are not skipped.
        let changes = timeline.update_traced(previous, now, &mut Tracer::new(&mut sink));
        report(&timeline, now, &changes);
        previous = now;
        frame += 1;
    }

    for target in [3.2, 1.2, 0.0] {
        let changes = timeline.update_traced(target, target, &mut Tracer::new(&mut sink));
        report(&timeline, target, &changes);
    }

    // -- forward-only replay ------------------------------------------------
    let mut playback = LifetimeContainer::new(ContainerConfig::playback().with_capacity(SUBTITLES.len()));
    load(&mut playback);
    for now in [0.0, 1.0, 2.0, 3.0, 4.0] {
        let changes = playback.update_traced(now, now, &mut Tracer::new(&mut sink));
        for (_, text) in &changes.expired {
            println!("  expired {text:?}");
        }
    }
    println!("{} entries left after playback", playback.len());

    // -- export Chrome trace ------------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    lifespan_debug::chrome::export(sink.second.as_bytes(), US_PER_SECOND, &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({frame} frames)");
}

fn load(container: &mut LifetimeContainer<&'static str>) {
    for &(start, end, text) in SUBTITLES {
        container.insert(LifetimeEntry::new(start, end), text);
    }
}

fn report(timeline: &LifetimeContainer<&'static str>, now: f64, changes: &LifetimeChanges<&'static str>) {
    if !changes.changed {
        return;
    }
    let visible: Vec<_> = timeline.alive().map(|(_, text)| *text).collect();
    println!("  t={now:.3}s showing {visible:?}");
}
