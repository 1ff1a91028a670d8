// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A payload-owning container driven by a [`LifetimeManager`].
//!
//! [`LifetimeContainer`] pairs every entry with a value of type `T` and keeps
//! the set of alive entries in insertion order, so callers can iterate "what
//! is visible right now" without writing an observer. Each update returns a
//! [`LifetimeChanges`] report instead of invoking callbacks.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::boundary::{BoundaryCrossing, BoundaryKind, CrossingDirection};
use crate::entry::{EntryId, LifetimeEntry};
use crate::event::{LifetimeObserver, NoopObserver};
use crate::manager::LifetimeManager;
use crate::trace::Tracer;

/// Container configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Remove entries (and hand back their payloads) once the range moves
    /// forward past their end.
    pub remove_expired: bool,
    /// Number of entries to reserve room for up front.
    pub initial_capacity: usize,
}

impl ContainerConfig {
    /// Keeps every entry until it is removed explicitly. Suitable for
    /// timelines that can be scrubbed in both directions.
    #[must_use]
    pub const fn rewindable() -> Self {
        Self {
            remove_expired: false,
            initial_capacity: 0,
        }
    }

    /// Forward-only playback: entries are dropped as soon as their end bound
    /// is crossed forward.
    #[must_use]
    pub const fn playback() -> Self {
        Self {
            remove_expired: true,
            initial_capacity: 0,
        }
    }

    /// Returns this config with a different initial capacity.
    #[must_use]
    pub const fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self::rewindable()
    }
}

/// What happened during one [`LifetimeContainer::update`].
///
/// Every list is in event delivery order.
#[derive(Debug)]
pub struct LifetimeChanges<T> {
    /// Whether any entry entered or left the alive set.
    pub changed: bool,
    /// Entries that became alive.
    pub became_alive: Vec<EntryId>,
    /// Entries that stopped being alive.
    pub became_dead: Vec<EntryId>,
    /// Every boundary crossing.
    pub crossings: Vec<BoundaryCrossing>,
    /// Entries removed because their end was crossed forward, with their
    /// payloads. Always empty unless [`ContainerConfig::remove_expired`] is set.
    pub expired: Vec<(EntryId, T)>,
}

impl<T> Default for LifetimeChanges<T> {
    fn default() -> Self {
        Self {
            changed: false,
            became_alive: Vec::new(),
            became_dead: Vec::new(),
            crossings: Vec::new(),
            expired: Vec::new(),
        }
    }
}

impl<T> LifetimeChanges<T> {
    /// Returns whether nothing at all was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.became_alive.is_empty()
            && self.became_dead.is_empty()
            && self.crossings.is_empty()
            && self.expired.is_empty()
    }
}

/// Entries with payloads and an insertion-ordered alive set.
///
/// ```rust
/// use lifespan_core::container::{ContainerConfig, LifetimeContainer};
/// use lifespan_core::entry::LifetimeEntry;
///
/// let mut notes = LifetimeContainer::new(ContainerConfig::rewindable());
/// notes.insert(LifetimeEntry::new(0.0, 4.0), "intro");
/// notes.insert(LifetimeEntry::new(2.0, 8.0), "verse");
///
/// notes.update_at(3.0);
/// let visible: Vec<_> = notes.alive().map(|(_, name)| *name).collect();
/// assert_eq!(visible, ["intro", "verse"]);
/// ```
#[derive(Debug)]
pub struct LifetimeContainer<T> {
    config: ContainerConfig,
    manager: LifetimeManager,
    /// Indexed by slot.
    payloads: Vec<Option<T>>,
    /// Alive entries keyed by registration sequence.
    alive: BTreeMap<u64, EntryId>,
}

impl<T> Default for LifetimeContainer<T> {
    fn default() -> Self {
        Self::new(ContainerConfig::default())
    }
}

impl<T> LifetimeContainer<T> {
    /// Creates an empty container.
    #[must_use]
    pub fn new(config: ContainerConfig) -> Self {
        Self {
            config,
            manager: LifetimeManager::with_capacity(config.initial_capacity),
            payloads: Vec::with_capacity(config.initial_capacity),
            alive: BTreeMap::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> ContainerConfig {
        self.config
    }

    /// Read access to the underlying manager.
    #[must_use]
    pub fn manager(&self) -> &LifetimeManager {
        &self.manager
    }

    /// Adds an entry. It is classified by the next update.
    pub fn insert(&mut self, entry: LifetimeEntry, payload: T) -> EntryId {
        let id = self.manager.add_entry(entry);
        let slot = id.index() as usize;
        if slot >= self.payloads.len() {
            self.payloads.resize_with(slot + 1, || None);
        }
        self.payloads[slot] = Some(payload);
        id
    }

    /// Removes an entry and returns its payload, or `None` if `id` is stale.
    pub fn remove(&mut self, id: EntryId) -> Option<T> {
        if !self.manager.contains(id) {
            return None;
        }
        let sequence = self.manager.sequence(id);
        self.manager.remove_entry(id, &mut NoopObserver);
        self.alive.remove(&sequence);
        self.payloads[id.index() as usize].take()
    }

    /// Removes every entry and returns the payloads in insertion order.
    pub fn clear(&mut self) -> Vec<T> {
        let mut order: Vec<(u64, EntryId)> = self
            .manager
            .entries()
            .map(|id| (self.manager.sequence(id), id))
            .collect();
        order.sort_unstable_by_key(|&(sequence, _)| sequence);

        let payloads = order
            .into_iter()
            .filter_map(|(_, id)| self.payloads[id.index() as usize].take())
            .collect();

        self.manager.clear_entries(&mut NoopObserver);
        self.alive.clear();
        payloads
    }

    /// Returns the payload of an entry, or `None` if `id` is stale.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&T> {
        if !self.manager.contains(id) {
            return None;
        }
        self.payloads.get(id.index() as usize)?.as_ref()
    }

    /// Returns the payload of an entry mutably, or `None` if `id` is stale.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        if !self.manager.contains(id) {
            return None;
        }
        self.payloads.get_mut(id.index() as usize)?.as_mut()
    }

    /// Returns the bounds of an entry, or `None` if `id` is stale.
    #[must_use]
    pub fn lifetime(&self, id: EntryId) -> Option<LifetimeEntry> {
        self.manager
            .contains(id)
            .then(|| self.manager.lifetime(id))
    }

    /// See [`LifetimeManager::set_lifetime`].
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_lifetime(&mut self, id: EntryId, start: f64, end: f64) {
        self.manager.set_lifetime(id, start, end);
    }

    /// See [`LifetimeManager::set_start`].
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_start(&mut self, id: EntryId, start: f64) {
        self.manager.set_start(id, start);
    }

    /// See [`LifetimeManager::set_end`].
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_end(&mut self, id: EntryId, end: f64) {
        self.manager.set_end(id, end);
    }

    /// Returns whether the entry is alive. Stale handles are not alive.
    #[must_use]
    pub fn is_alive(&self, id: EntryId) -> bool {
        self.manager.contains(id) && self.manager.is_alive(id)
    }

    /// Iterates over alive entries in insertion order.
    pub fn alive(&self) -> impl Iterator<Item = (EntryId, &T)> + '_ {
        self.alive.values().filter_map(|&id| {
            self.payloads
                .get(id.index() as usize)
                .and_then(Option::as_ref)
                .map(|payload| (id, payload))
        })
    }

    /// Returns the number of alive entries.
    #[must_use]
    pub fn alive_len(&self) -> usize {
        self.alive.len()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.manager.len()
    }

    /// Returns whether the container holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.manager.is_empty()
    }

    /// Updates for the single instant `time`.
    pub fn update_at(&mut self, time: f64) -> LifetimeChanges<T> {
        self.update(time, time)
    }

    /// Updates against `[range_start, range_end]` and reports what changed.
    pub fn update(&mut self, range_start: f64, range_end: f64) -> LifetimeChanges<T> {
        self.update_traced(range_start, range_end, &mut Tracer::none())
    }

    /// Like [`update`](Self::update), reporting progress to `tracer`.
    pub fn update_traced(
        &mut self,
        range_start: f64,
        range_end: f64,
        tracer: &mut Tracer<'_>,
    ) -> LifetimeChanges<T> {
        let mut collector = Collector {
            alive: &mut self.alive,
            payloads: &mut self.payloads,
            remove_expired: self.config.remove_expired,
            changes: LifetimeChanges::default(),
        };
        let changed = self
            .manager
            .update_traced(range_start, range_end, &mut collector, tracer);

        let mut changes = collector.changes;
        changes.changed = changed;
        changes
    }
}

/// Observer that mirrors events into the container's state.
struct Collector<'c, T> {
    alive: &'c mut BTreeMap<u64, EntryId>,
    payloads: &'c mut Vec<Option<T>>,
    remove_expired: bool,
    changes: LifetimeChanges<T>,
}

impl<T> LifetimeObserver for Collector<'_, T> {
    fn entry_became_alive(&mut self, manager: &mut LifetimeManager, id: EntryId) {
        self.alive.insert(manager.sequence(id), id);
        self.changes.became_alive.push(id);
    }

    fn entry_became_dead(&mut self, manager: &mut LifetimeManager, id: EntryId) {
        self.alive.remove(&manager.sequence(id));
        self.changes.became_dead.push(id);
    }

    fn entry_crossed_boundary(
        &mut self,
        manager: &mut LifetimeManager,
        id: EntryId,
        kind: BoundaryKind,
        direction: CrossingDirection,
    ) {
        self.changes.crossings.push(BoundaryCrossing {
            entry: id,
            kind,
            direction,
        });

        if self.remove_expired && kind == BoundaryKind::End && direction == CrossingDirection::Forward {
            // Already dead: its BecameDead precedes the end crossing.
            manager.remove_entry(id, &mut NoopObserver);
            if let Some(payload) = self.payloads[id.index() as usize].take() {
                self.changes.expired.push((id, payload));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn names(container: &LifetimeContainer<&'static str>) -> Vec<&'static str> {
        container.alive().map(|(_, name)| *name).collect()
    }

    #[test]
    fn alive_iterates_in_insertion_order() {
        let mut container = LifetimeContainer::new(ContainerConfig::rewindable());
        let late = container.insert(LifetimeEntry::new(5.0, 15.0), "late");
        let early = container.insert(LifetimeEntry::new(0.0, 10.0), "early");

        let changes = container.update_at(0.0);
        assert_eq!(changes.became_alive, vec![early]);
        assert!(changes.changed);

        let changes = container.update_at(6.0);
        assert_eq!(changes.became_alive, vec![late]);
        assert_eq!(
            changes.crossings,
            vec![BoundaryCrossing {
                entry: late,
                kind: BoundaryKind::Start,
                direction: CrossingDirection::Forward,
            }]
        );

        // Activation order was early, late; insertion order wins.
        let ids: Vec<_> = container.alive().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![late, early]);
        assert_eq!(container.alive_len(), 2);
    }

    #[test]
    fn quiet_update_reports_nothing() {
        let mut container = LifetimeContainer::new(ContainerConfig::rewindable());
        container.insert(LifetimeEntry::new(0.0, 10.0), 1_u32);
        container.update_at(1.0);

        let changes = container.update_at(2.0);
        assert!(changes.is_empty());
        assert!(!changes.changed);
    }

    #[test]
    fn remove_returns_payload_once() {
        let mut container = LifetimeContainer::new(ContainerConfig::rewindable());
        let id = container.insert(LifetimeEntry::ALWAYS, "always");
        container.update_at(0.0);
        assert_eq!(container.alive_len(), 1);

        assert_eq!(container.remove(id), Some("always"));
        assert_eq!(container.alive_len(), 0);
        assert!(container.is_empty());
        assert_eq!(container.remove(id), None);
        assert_eq!(container.get(id), None);
        assert!(!container.is_alive(id));
    }

    #[test]
    fn get_mut_updates_payload() {
        let mut container = LifetimeContainer::new(ContainerConfig::rewindable());
        let id = container.insert(LifetimeEntry::new(0.0, 1.0), 10_i32);
        if let Some(value) = container.get_mut(id) {
            *value += 5;
        }
        assert_eq!(container.get(id), Some(&15));
    }

    #[test]
    fn rewindable_keeps_expired_entries() {
        let mut container = LifetimeContainer::new(ContainerConfig::rewindable());
        let id = container.insert(LifetimeEntry::new(0.0, 10.0), "clip");

        container.update_at(5.0);
        let changes = container.update_at(20.0);
        assert_eq!(changes.became_dead, vec![id]);
        assert!(changes.expired.is_empty());
        assert_eq!(container.len(), 1);

        let changes = container.update_at(5.0);
        assert_eq!(changes.became_alive, vec![id]);
        assert_eq!(names(&container), vec!["clip"]);
    }

    #[test]
    fn playback_drops_expired_entries() {
        let mut container = LifetimeContainer::new(ContainerConfig::playback());
        let short = container.insert(LifetimeEntry::new(0.0, 10.0), "short");
        let long = container.insert(LifetimeEntry::new(0.0, 100.0), "long");

        container.update_at(5.0);
        let changes = container.update_at(20.0);
        assert_eq!(changes.became_dead, vec![short]);
        assert_eq!(changes.expired, vec![(short, "short")]);
        assert_eq!(container.len(), 1);
        assert_eq!(container.get(short), None);
        assert_eq!(names(&container), vec!["long"]);

        // Rewinding does not bring it back.
        let changes = container.update_at(5.0);
        assert!(changes.became_alive.is_empty());
        assert!(container.is_alive(long));
        container.manager().assert_invariants();
    }

    #[test]
    fn playback_expires_engulfed_entries() {
        let mut container = LifetimeContainer::new(ContainerConfig::playback());
        let id = container.insert(LifetimeEntry::new(10.0, 20.0), "blip");

        container.update_at(0.0);
        let changes = container.update_at(30.0);
        assert_eq!(changes.became_alive, vec![id]);
        assert_eq!(changes.became_dead, vec![id]);
        assert_eq!(changes.crossings.len(), 2);
        assert_eq!(changes.expired, vec![(id, "blip")]);
        assert!(container.is_empty());
        assert_eq!(container.alive_len(), 0);
    }

    #[test]
    fn playback_keeps_entries_that_die_backward() {
        let mut container = LifetimeContainer::new(ContainerConfig::playback());
        let id = container.insert(LifetimeEntry::new(10.0, 20.0), "later");

        container.update_at(15.0);
        let changes = container.update_at(0.0);
        assert_eq!(changes.became_dead, vec![id]);
        assert!(changes.expired.is_empty());
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn bounds_changes_apply_on_next_update() {
        let mut container = LifetimeContainer::new(ContainerConfig::rewindable());
        let id = container.insert(LifetimeEntry::new(10.0, 20.0), ());
        container.update_at(0.0);

        container.set_start(id, 0.0);
        assert!(!container.is_alive(id));
        container.update_at(0.0);
        assert!(container.is_alive(id));

        container.set_end(id, 0.0);
        container.update_at(0.0);
        assert!(!container.is_alive(id));

        container.set_lifetime(id, -5.0, 5.0);
        container.update_at(0.0);
        assert!(container.is_alive(id));
        assert_eq!(container.lifetime(id), Some(LifetimeEntry::new(-5.0, 5.0)));
    }

    #[test]
    fn clear_returns_payloads_in_insertion_order() {
        let mut container = LifetimeContainer::new(ContainerConfig::rewindable());
        let a = container.insert(LifetimeEntry::new(0.0, 1.0), "a");
        container.insert(LifetimeEntry::new(0.0, 1.0), "b");
        container.remove(a);
        // Reuses the first slot but is newer than "b".
        container.insert(LifetimeEntry::new(0.0, 1.0), "c");
        container.update_at(0.5);

        assert_eq!(container.clear(), vec!["b", "c"]);
        assert!(container.is_empty());
        assert_eq!(container.alive_len(), 0);
        assert!(container.update_at(0.5).is_empty());
    }

    #[test]
    fn config_presets() {
        assert!(!ContainerConfig::rewindable().remove_expired);
        assert!(ContainerConfig::playback().remove_expired);
        assert_eq!(ContainerConfig::default(), ContainerConfig::rewindable());
        assert_eq!(ContainerConfig::playback().with_capacity(64).initial_capacity, 64);
    }
}
