// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry classification.

use super::interval::LifetimeEntry;

/// Classification of an entry relative to the most recently processed range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// Registered but not yet classified against any range.
    New,
    /// The range lies entirely before the entry's start.
    Future,
    /// The range overlaps the entry; the entry is alive.
    Current,
    /// The range lies at or after the entry's end.
    Past,
}

impl EntryState {
    /// Classifies `entry` against the range `[range_start, range_end]`.
    ///
    /// Consider a static entry and a moving range:
    ///
    /// ```text
    ///                 [-----------Entry-----------)
    /// [----Range----] |                           |                  Future
    ///   [----Range----]                           |                  Current
    ///                 |             [----Range----]                  Current
    ///                 |                           [----Range----]    Past
    ///                 |                           | [----Range----]  Past
    /// ```
    ///
    /// Exactly one of the three states holds for any `range_start <=
    /// range_end`. Never returns [`EntryState::New`].
    #[must_use]
    pub fn classify(entry: &LifetimeEntry, range_start: f64, range_end: f64) -> Self {
        if range_end < entry.start() {
            Self::Future
        } else if range_start >= entry.end() {
            Self::Past
        } else {
            Self::Current
        }
    }

    /// Returns whether this state is [`EntryState::Current`].
    #[inline]
    #[must_use]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(start: f64, end: f64, range_start: f64, range_end: f64) -> EntryState {
        EntryState::classify(&LifetimeEntry::new(start, end), range_start, range_end)
    }

    #[test]
    fn point_ranges() {
        assert_eq!(classify(10.0, 20.0, 9.0, 9.0), EntryState::Future);
        assert_eq!(classify(10.0, 20.0, 10.0, 10.0), EntryState::Current);
        assert_eq!(classify(10.0, 20.0, 19.5, 19.5), EntryState::Current);
        assert_eq!(classify(10.0, 20.0, 20.0, 20.0), EntryState::Past);
    }

    #[test]
    fn wide_ranges_touching_bounds() {
        // Range end is inclusive against the entry start.
        assert_eq!(classify(10.0, 20.0, 0.0, 10.0), EntryState::Current);
        // Range start is compared against the exclusive entry end.
        assert_eq!(classify(10.0, 20.0, 19.0, 30.0), EntryState::Current);
        assert_eq!(classify(10.0, 20.0, 20.0, 30.0), EntryState::Past);
        assert_eq!(classify(10.0, 20.0, 0.0, 30.0), EntryState::Current);
    }

    #[test]
    fn empty_interval_is_never_alive() {
        assert_eq!(classify(2.0, 2.0, 1.0, 1.0), EntryState::Future);
        assert_eq!(classify(2.0, 2.0, 2.0, 2.0), EntryState::Past);
        assert_eq!(classify(2.0, 2.0, 3.0, 3.0), EntryState::Past);
    }

    #[test]
    fn classification_is_total() {
        let bounds = [-3.0, -1.0, 0.0, 0.5, 1.0, 2.0, 4.0];
        for &start in &bounds {
            for &end in &bounds {
                let entry = LifetimeEntry::new(start, end);
                for &s in &bounds {
                    for &e in &bounds {
                        if e < s {
                            continue;
                        }
                        let state = EntryState::classify(&entry, s, e);
                        let future = e < entry.start();
                        let past = s >= entry.end();
                        let current = !future && !past;
                        let holds = [
                            state == EntryState::Future && future,
                            state == EntryState::Past && past,
                            state == EntryState::Current && current,
                        ];
                        assert_eq!(
                            holds.iter().filter(|&&h| h).count(),
                            1,
                            "entry {entry:?} range [{s}, {e}] classified {state:?}"
                        );
                        assert_ne!(state, EntryState::New, "classify never yields New");
                    }
                }
            }
        }
    }

    #[test]
    fn always_entry_is_alive_everywhere() {
        for t in [-1e12, 0.0, 1e12] {
            assert!(EntryState::classify(&LifetimeEntry::ALWAYS, t, t).is_alive());
        }
    }
}
