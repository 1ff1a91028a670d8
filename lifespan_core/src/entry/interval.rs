// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Half-open lifetime intervals.

/// The `[start, end)` interval during which an entry is alive.
///
/// The interval always satisfies `end >= start`: any mutation that would
/// invert it clamps `end` up to `start` instead of failing. Bounds may be
/// negative, equal (an empty interval that is never alive), or infinite.
///
/// A `LifetimeEntry` on its own is a plain value. Once registered with a
/// [`LifetimeManager`](crate::manager::LifetimeManager), its bounds live in
/// the manager and must be changed through
/// [`LifetimeManager::set_lifetime`](crate::manager::LifetimeManager::set_lifetime)
/// and friends so the manager can keep its ordered groups consistent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifetimeEntry {
    start: f64,
    end: f64,
}

impl LifetimeEntry {
    /// An entry that is alive at every time.
    pub const ALWAYS: Self = Self {
        start: f64::NEG_INFINITY,
        end: f64::INFINITY,
    };

    /// Creates an entry spanning `[start, end)`.
    ///
    /// If `end < start`, `end` is clamped to `start`.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Returns the inclusive start bound.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Returns the exclusive end bound.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// Returns `end - start`.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Sets the start bound, clamping `end` up if needed.
    pub fn set_start(&mut self, start: f64) {
        if let Some(next) = self.with_start(start) {
            *self = next;
        }
    }

    /// Sets the end bound, clamping it to `start` if it would precede it.
    pub fn set_end(&mut self, end: f64) {
        if let Some(next) = self.with_end(end) {
            *self = next;
        }
    }

    /// Returns the bounds that result from moving the start bound, or `None`
    /// if `start` is unchanged.
    #[must_use]
    pub fn with_start(&self, start: f64) -> Option<Self> {
        if start == self.start {
            return None;
        }
        Some(Self::new(start, self.end))
    }

    /// Returns the bounds that result from moving the end bound, or `None` if
    /// `end` is unchanged.
    #[must_use]
    pub fn with_end(&self, end: f64) -> Option<Self> {
        if end == self.end {
            return None;
        }
        let next = Self::new(self.start, end);
        // Clamping may land back on the current bounds.
        (next != *self).then_some(next)
    }
}

impl Default for LifetimeEntry {
    fn default() -> Self {
        Self::ALWAYS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_inverted_interval() {
        let entry = LifetimeEntry::new(10.0, 5.0);
        assert_eq!(entry.start(), 10.0);
        assert_eq!(entry.end(), 10.0);
        assert_eq!(entry.duration(), 0.0);
    }

    #[test]
    fn set_start_past_end_drags_end() {
        let mut entry = LifetimeEntry::new(0.0, 5.0);
        entry.set_start(8.0);
        assert_eq!(entry, LifetimeEntry::new(8.0, 8.0));
    }

    #[test]
    fn set_end_before_start_clamps() {
        let mut entry = LifetimeEntry::new(3.0, 5.0);
        entry.set_end(-1.0);
        assert_eq!(entry.end(), 3.0);
    }

    #[test]
    fn unchanged_bounds_propose_nothing() {
        let entry = LifetimeEntry::new(1.0, 2.0);
        assert!(entry.with_start(1.0).is_none());
        assert!(entry.with_end(2.0).is_none());

        let empty = LifetimeEntry::new(4.0, 4.0);
        assert!(
            empty.with_end(1.0).is_none(),
            "clamped end equals the current end"
        );
    }

    #[test]
    fn always_covers_everything() {
        let entry = LifetimeEntry::default();
        assert_eq!(entry, LifetimeEntry::ALWAYS);
        assert!(entry.start() < -1e300);
        assert!(entry.end() > 1e300);
    }
}
