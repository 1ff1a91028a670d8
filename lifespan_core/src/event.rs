// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition events and the observer that receives them.
//!
//! During [`LifetimeManager::update`](crate::manager::LifetimeManager::update)
//! every transition is appended to an [`EventQueue`]. The queue is drained into
//! a [`LifetimeObserver`] only after all structural changes for that update are
//! finished, so a callback always sees a consistent manager and may safely add,
//! remove, or re-bound other entries.

use alloc::collections::VecDeque;

use crate::boundary::{BoundaryCrossing, BoundaryKind, CrossingDirection};
use crate::entry::EntryId;
use crate::manager::LifetimeManager;

/// A queued notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifetimeEvent {
    /// The entry's classification became `Current`.
    BecameAlive(EntryId),
    /// The entry's classification left `Current`.
    BecameDead(EntryId),
    /// The moving range crossed one of the entry's bounds.
    CrossedBoundary(BoundaryCrossing),
}

impl LifetimeEvent {
    /// Returns the entry the event refers to.
    #[must_use]
    pub const fn entry(&self) -> EntryId {
        match self {
            Self::BecameAlive(id) | Self::BecameDead(id) => *id,
            Self::CrossedBoundary(crossing) => crossing.entry,
        }
    }
}

/// FIFO buffer of [`LifetimeEvent`]s accumulated during one update pass.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<LifetimeEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Appends an event.
    #[inline]
    pub fn push(&mut self, event: LifetimeEvent) {
        self.events.push_back(event);
    }

    /// Removes and returns the oldest event.
    #[inline]
    pub fn pop(&mut self) -> Option<LifetimeEvent> {
        self.events.pop_front()
    }

    /// Returns the number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discards all queued events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Iterates over queued events in order.
    pub fn iter(&self) -> impl Iterator<Item = &LifetimeEvent> + '_ {
        self.events.iter()
    }
}

/// Receives alive/dead and boundary-crossing notifications.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
///
/// Callbacks receive the manager that produced the event. They may call
/// [`add_entry`](LifetimeManager::add_entry),
/// [`remove_entry`](LifetimeManager::remove_entry),
/// [`clear_entries`](LifetimeManager::clear_entries) and the bounds setters,
/// but must not call [`update`](LifetimeManager::update) on it. Events for
/// entries removed by an earlier callback of the same drain are skipped.
pub trait LifetimeObserver {
    /// Called when an entry becomes alive.
    fn entry_became_alive(&mut self, manager: &mut LifetimeManager, id: EntryId) {
        _ = (manager, id);
    }

    /// Called when an entry stops being alive.
    ///
    /// When triggered by [`remove_entry`](LifetimeManager::remove_entry) or
    /// [`clear_entries`](LifetimeManager::clear_entries), `id` is already
    /// stale.
    fn entry_became_dead(&mut self, manager: &mut LifetimeManager, id: EntryId) {
        _ = (manager, id);
    }

    /// Called for every bound the moving range crosses.
    fn entry_crossed_boundary(
        &mut self,
        manager: &mut LifetimeManager,
        id: EntryId,
        kind: BoundaryKind,
        direction: CrossingDirection,
    ) {
        _ = (manager, id, kind, direction);
    }
}

/// A [`LifetimeObserver`] that ignores all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl LifetimeObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(idx: u32) -> EntryId {
        EntryId { idx, generation: 0 }
    }

    #[test]
    fn queue_is_fifo() {
        let mut queue = EventQueue::new();
        queue.push(LifetimeEvent::BecameAlive(id(0)));
        queue.push(LifetimeEvent::CrossedBoundary(BoundaryCrossing {
            entry: id(1),
            kind: BoundaryKind::End,
            direction: CrossingDirection::Forward,
        }));
        queue.push(LifetimeEvent::BecameDead(id(2)));
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.pop(), Some(LifetimeEvent::BecameAlive(id(0))));
        assert_eq!(queue.pop().map(|e| e.entry()), Some(id(1)));
        assert_eq!(queue.pop(), Some(LifetimeEvent::BecameDead(id(2))));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_discards_events() {
        let mut queue = EventQueue::new();
        queue.push(LifetimeEvent::BecameAlive(id(4)));
        assert_eq!(queue.iter().count(), 1);
        queue.clear();
        assert!(queue.is_empty());
    }
}
