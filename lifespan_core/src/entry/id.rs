// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry identity.

use core::fmt;

/// A handle to an entry registered with a
/// [`LifetimeManager`](crate::manager::LifetimeManager).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after an entry is removed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    /// Slot index into the manager's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the manager's generation for this slot.
    pub(crate) generation: u32,
}

impl EntryId {
    /// Returns the raw slot index.
    ///
    /// Slot indices are dense and recycled, which makes them suitable for
    /// side tables indexed by entry (see
    /// [`LifetimeContainer`](crate::container::LifetimeContainer)).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({}@gen{})", self.idx, self.generation)
    }
}
