// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-windowed lifetime scheduling.
//!
//! The [`LifetimeManager`] decides which registered entries are alive for a
//! given time range and reports every change through a [`LifetimeObserver`].
//! See the struct docs for the grouping scheme and the cost model.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::mem;

use crate::boundary::{self, BoundaryCrossing};
use crate::entry::{EntryId, EntryState, LifetimeEntry};
use crate::event::{EventQueue, LifetimeEvent, LifetimeObserver};
#[cfg(feature = "trace-rich")]
use crate::trace::TransitionEvent;
use crate::trace::{Tracer, UpdateBeginEvent, UpdateSummary};

/// Counters collected during one update pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Entries whose classification was evaluated while pulling the ordered
    /// groups or re-checking the alive set.
    pub entries_checked: u32,
    /// Pending entries classified at the start of the pass.
    pub pending_drained: u32,
    /// `BecameAlive` events queued.
    pub became_alive: u32,
    /// `BecameDead` events queued.
    pub became_dead: u32,
    /// Boundary crossings queued.
    pub boundary_crossings: u32,
}

/// Which group a slot currently belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Group {
    Vacant,
    Pending,
    Active,
    Future,
    Past,
}

/// Membership record in an unordered group.
///
/// Removal leaves the record in place; it is skipped once the slot's group or
/// sequence no longer matches.
#[derive(Clone, Copy, Debug)]
struct Member {
    idx: u32,
    sequence: u64,
}

/// Sort key of the ordered groups: a bound plus the registration sequence.
#[derive(Clone, Copy, Debug)]
struct BoundKey {
    bound: f64,
    sequence: u64,
    idx: u32,
}

impl PartialEq for BoundKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BoundKey {}

impl PartialOrd for BoundKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BoundKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bound
            .total_cmp(&other.bound)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Tracks which entries are alive for a moving time range.
///
/// # Groups
///
/// Every registered entry sits in exactly one of four groups:
///
/// - **pending** — added (or re-bounded out of an ordered group) since the
///   last update, in insertion order.
/// - **active** — classified [`Current`](EntryState::Current), in activation
///   order.
/// - **future** — ordered by `(start, sequence)`.
/// - **past** — ordered by `(end, sequence)`.
///
/// # Cost model
///
/// An [`update`](Self::update) drains pending, pulls entries off the front of
/// the future group and the back of the past group only while they actually
/// change classification, and re-checks every alive entry. Its cost is
/// therefore proportional to `pending + transitioned + alive`, independent of
/// the total number of dormant entries.
///
/// # Events
///
/// Transitions are queued while groups are being rearranged and delivered to
/// the [`LifetimeObserver`] only once the pass is structurally complete.
/// Per transition, the coarse events come first (`BecameAlive` and/or
/// `BecameDead`), followed by the boundary crossings in table order (see
/// [`boundary`](crate::boundary)).
///
/// # Usage
///
/// ```rust
/// use lifespan_core::entry::LifetimeEntry;
/// use lifespan_core::event::NoopObserver;
/// use lifespan_core::manager::LifetimeManager;
///
/// let mut manager = LifetimeManager::new();
/// let id = manager.add_entry(LifetimeEntry::new(10.0, 20.0));
///
/// assert!(!manager.update_at(0.0, &mut NoopObserver));
/// assert!(manager.update_at(12.0, &mut NoopObserver));
/// assert!(manager.is_alive(id));
/// ```
#[derive(Debug)]
pub struct LifetimeManager {
    // -- Per-slot data --
    bounds: Vec<LifetimeEntry>,
    state: Vec<EntryState>,
    sequence: Vec<u64>,
    group: Vec<Group>,

    // -- Allocation --
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,

    // -- Groups --
    pending: Vec<Member>,
    pending_len: usize,
    active: Vec<Member>,
    active_len: usize,
    future: BTreeSet<BoundKey>,
    past: BTreeSet<BoundKey>,

    // -- Update bookkeeping --
    events: EventQueue,
    next_sequence: u64,
    update_index: u64,
    last_stats: UpdateStats,
    dispatching: bool,
}

impl Default for LifetimeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LifetimeManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty manager with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bounds: Vec::with_capacity(capacity),
            state: Vec::with_capacity(capacity),
            sequence: Vec::with_capacity(capacity),
            group: Vec::with_capacity(capacity),
            generation: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
            pending: Vec::with_capacity(capacity),
            pending_len: 0,
            active: Vec::new(),
            active_len: 0,
            future: BTreeSet::new(),
            past: BTreeSet::new(),
            events: EventQueue::new(),
            next_sequence: 0,
            update_index: 0,
            last_stats: UpdateStats::default(),
            dispatching: false,
        }
    }

    // -- Registration API --

    /// Registers an entry and returns its handle.
    ///
    /// The entry starts in [`EntryState::New`] and is classified by the next
    /// [`update`](Self::update).
    pub fn add_entry(&mut self, entry: LifetimeEntry) -> EntryId {
        self.next_sequence += 1;
        let sequence = self.next_sequence;

        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.bounds[i] = entry;
            self.state[i] = EntryState::New;
            self.sequence[i] = sequence;
            self.group[i] = Group::Pending;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.bounds.push(entry);
            self.state.push(EntryState::New);
            self.sequence.push(sequence);
            self.group.push(Group::Pending);
            self.generation.push(0);
            idx
        };

        self.pending.push(Member { idx, sequence });
        self.pending_len += 1;

        EntryId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Unregisters an entry.
    ///
    /// If the entry was alive, `observer` receives
    /// [`entry_became_dead`](LifetimeObserver::entry_became_dead) before this
    /// returns. Returns `false` if `id` is not registered.
    pub fn remove_entry<O: LifetimeObserver + ?Sized>(
        &mut self,
        id: EntryId,
        observer: &mut O,
    ) -> bool {
        if !self.contains(id) {
            return false;
        }

        let idx = id.idx;
        let was_alive = match self.group[idx as usize] {
            Group::Pending => {
                self.pending_len -= 1;
                false
            }
            Group::Active => {
                self.active_len -= 1;
                true
            }
            Group::Future | Group::Past => {
                let removed = self.take_from_ordered(idx);
                debug_assert!(removed, "ordered group lost {id:?}");
                false
            }
            Group::Vacant => return false,
        };

        self.release(idx);

        if was_alive {
            observer.entry_became_dead(self, id);
        }
        true
    }

    /// Unregisters every entry.
    ///
    /// Each entry that was alive fires
    /// [`entry_became_dead`](LifetimeObserver::entry_became_dead), in
    /// activation order, after all groups have been emptied.
    pub fn clear_entries<O: LifetimeObserver + ?Sized>(&mut self, observer: &mut O) {
        let formerly_alive: Vec<EntryId> = self.active().collect();

        for idx in 0..self.len {
            if self.group[idx as usize] != Group::Vacant {
                self.release(idx);
            }
        }
        self.pending.clear();
        self.pending_len = 0;
        self.active.clear();
        self.active_len = 0;
        self.future.clear();
        self.past.clear();

        for id in formerly_alive {
            observer.entry_became_dead(self, id);
        }
    }

    /// Returns whether the given handle refers to a registered entry.
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && self.group[id.idx as usize] != Group::Vacant
    }

    // -- Bounds API --

    /// Replaces the bounds of a registered entry.
    ///
    /// `end` is clamped to `start`. Entries in the future or past group are
    /// moved back to pending and reclassified by the next update; pending and
    /// alive entries take the new bounds in place. No event fires until the
    /// next update.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_lifetime(&mut self, id: EntryId, start: f64, end: f64) {
        self.validate(id);
        let next = LifetimeEntry::new(start, end);
        if next != self.bounds[id.idx as usize] {
            self.request_bounds_change(id.idx, next);
        }
    }

    /// Moves the start bound of a registered entry, dragging `end` along if
    /// it would otherwise precede `start`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_start(&mut self, id: EntryId, start: f64) {
        self.validate(id);
        if let Some(next) = self.bounds[id.idx as usize].with_start(start) {
            self.request_bounds_change(id.idx, next);
        }
    }

    /// Moves the end bound of a registered entry, clamped to its start.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_end(&mut self, id: EntryId, end: f64) {
        self.validate(id);
        if let Some(next) = self.bounds[id.idx as usize].with_end(end) {
            self.request_bounds_change(id.idx, next);
        }
    }

    // -- Queries --

    /// Returns the bounds of an entry.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn lifetime(&self, id: EntryId) -> LifetimeEntry {
        self.validate(id);
        self.bounds[id.idx as usize]
    }

    /// Returns the classification of an entry as of the last update.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn state(&self, id: EntryId) -> EntryState {
        self.validate(id);
        self.state[id.idx as usize]
    }

    /// Returns the registration sequence number of an entry.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn sequence(&self, id: EntryId) -> u64 {
        self.validate(id);
        self.sequence[id.idx as usize]
    }

    /// Returns whether an entry is currently alive.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_alive(&self, id: EntryId) -> bool {
        self.state(id).is_alive()
    }

    /// Returns the number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns whether no entries are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of alive entries.
    #[must_use]
    pub fn alive_len(&self) -> usize {
        self.active_len
    }

    /// Returns the number of entries waiting for classification.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending_len
    }

    /// Returns the number of entries in the future group.
    #[must_use]
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Returns the number of entries in the past group.
    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Iterates over alive entries in activation order.
    pub fn active(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.active
            .iter()
            .filter(|m| self.holds(**m, Group::Active))
            .map(|m| self.id_at(m.idx))
    }

    /// Iterates over all registered entries in slot order.
    pub fn entries(&self) -> impl Iterator<Item = EntryId> + '_ {
        (0..self.len)
            .filter(|&idx| self.group[idx as usize] != Group::Vacant)
            .map(|idx| self.id_at(idx))
    }

    /// Returns the number of updates processed so far.
    #[must_use]
    pub fn update_index(&self) -> u64 {
        self.update_index
    }

    /// Returns the counters of the most recent update.
    #[must_use]
    pub fn last_update_stats(&self) -> UpdateStats {
        self.last_stats
    }

    // -- Update --

    /// Reclassifies entries for the single instant `time`.
    ///
    /// Equivalent to `update(time, time, observer)`.
    pub fn update_at<O: LifetimeObserver + ?Sized>(&mut self, time: f64, observer: &mut O) -> bool {
        self.update(time, time, observer)
    }

    /// Reclassifies entries against `[range_start, range_end]` and delivers
    /// the resulting events to `observer`.
    ///
    /// `range_end` is clamped to be at least `range_start`. Returns whether
    /// any entry entered or left the alive set during the pass.
    ///
    /// Must not be called from inside an observer callback.
    pub fn update<O: LifetimeObserver + ?Sized>(
        &mut self,
        range_start: f64,
        range_end: f64,
        observer: &mut O,
    ) -> bool {
        self.update_traced(range_start, range_end, observer, &mut Tracer::none())
    }

    /// Like [`update`](Self::update), reporting progress to `tracer`.
    pub fn update_traced<O: LifetimeObserver + ?Sized>(
        &mut self,
        range_start: f64,
        range_end: f64,
        observer: &mut O,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        debug_assert!(
            !self.dispatching,
            "update called from inside a lifetime callback"
        );

        let range_end = range_end.max(range_start);
        self.update_index += 1;
        let mut stats = UpdateStats::default();
        let mut changed = false;

        tracer.update_begin(&UpdateBeginEvent {
            update_index: self.update_index,
            range_start,
            range_end,
            pending: saturating_u32(self.pending_len),
            active: saturating_u32(self.active_len),
            future: saturating_u32(self.future.len()),
            past: saturating_u32(self.past.len()),
        });

        // 1. Newly added and re-bounded entries.
        let mut pending = mem::take(&mut self.pending);
        self.pending_len = 0;
        for member in pending.drain(..) {
            if !self.holds(member, Group::Pending) {
                continue;
            }
            stats.pending_drained += 1;
            changed |= self.classify_pending(member.idx, range_start, range_end, &mut stats, tracer);
        }
        self.pending = pending;

        // 2. Entries coming alive as time increases.
        while let Some(&key) = self.future.first() {
            stats.entries_checked += 1;
            debug_assert_eq!(self.state[key.idx as usize], EntryState::Future);

            let next = EntryState::classify(&self.bounds[key.idx as usize], range_start, range_end);
            if next == EntryState::Future {
                // Everything behind the minimum starts at least as late.
                break;
            }

            self.future.pop_first();
            changed |= self.transition(key.idx, EntryState::Future, next, &mut stats, tracer);
        }

        // 3. Symmetric to the above for rewinding.
        while let Some(&key) = self.past.last() {
            stats.entries_checked += 1;
            debug_assert_eq!(self.state[key.idx as usize], EntryState::Past);

            let next = EntryState::classify(&self.bounds[key.idx as usize], range_start, range_end);
            if next == EntryState::Past {
                break;
            }

            self.past.pop_last();
            changed |= self.transition(key.idx, EntryState::Past, next, &mut stats, tracer);
        }

        // 4. Alive entries dying in either direction.
        let mut active = mem::take(&mut self.active);
        for &member in &active {
            if !self.holds(member, Group::Active) {
                continue;
            }
            stats.entries_checked += 1;

            let next = EntryState::classify(&self.bounds[member.idx as usize], range_start, range_end);
            if next != EntryState::Current {
                self.active_len -= 1;
                changed |= self.transition(member.idx, EntryState::Current, next, &mut stats, tracer);
            }
        }
        active.retain(|&m| self.holds(m, Group::Active));
        self.active = active;

        self.last_stats = stats;
        let alive = saturating_u32(self.active_len);

        // 5. Deliver.
        self.dispatch(observer);

        tracer.update_summary(&UpdateSummary {
            update_index: self.update_index,
            range_start,
            range_end,
            stats,
            alive,
            changed,
        });

        changed
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: EntryId) {
        assert!(
            self.contains(id),
            "stale EntryId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn id_at(&self, idx: u32) -> EntryId {
        EntryId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns whether `member` is the live record of its slot in `group`.
    fn holds(&self, member: Member, group: Group) -> bool {
        let i = member.idx as usize;
        self.group[i] == group && self.sequence[i] == member.sequence
    }

    fn future_key(&self, idx: u32) -> BoundKey {
        BoundKey {
            bound: self.bounds[idx as usize].start(),
            sequence: self.sequence[idx as usize],
            idx,
        }
    }

    fn past_key(&self, idx: u32) -> BoundKey {
        BoundKey {
            bound: self.bounds[idx as usize].end(),
            sequence: self.sequence[idx as usize],
            idx,
        }
    }

    /// Removes `idx` from the future or past group using its current bounds.
    fn take_from_ordered(&mut self, idx: u32) -> bool {
        match self.group[idx as usize] {
            Group::Future => {
                let key = self.future_key(idx);
                self.future.remove(&key)
            }
            Group::Past => {
                let key = self.past_key(idx);
                self.past.remove(&key)
            }
            _ => false,
        }
    }

    /// Applies new bounds without ever mutating a key inside an ordered group.
    fn request_bounds_change(&mut self, idx: u32, next: LifetimeEntry) {
        let i = idx as usize;
        match self.group[i] {
            Group::Pending | Group::Active => self.bounds[i] = next,
            Group::Future | Group::Past => {
                let removed = self.take_from_ordered(idx);
                debug_assert!(removed, "ordered group lost slot {idx}");
                self.bounds[i] = next;
                // The Future/Past tag is kept so the next update can report
                // the crossings relative to the last processed range.
                self.group[i] = Group::Pending;
                self.pending.push(Member {
                    idx,
                    sequence: self.sequence[i],
                });
                self.pending_len += 1;
            }
            Group::Vacant => unreachable!("bounds change on vacant slot {idx}"),
        }
    }

    /// Frees a slot; its handle becomes stale.
    fn release(&mut self, idx: u32) {
        let i = idx as usize;
        self.group[i] = Group::Vacant;
        self.state[i] = EntryState::New;
        self.sequence[i] = 0;
        self.generation[i] = self.generation[i].wrapping_add(1);
        self.free_list.push(idx);
    }

    /// Inserts `idx` into the group matching `state` and tags it.
    fn place(&mut self, idx: u32, state: EntryState) {
        let i = idx as usize;
        self.state[i] = state;
        match state {
            EntryState::Future => {
                self.group[i] = Group::Future;
                let key = self.future_key(idx);
                self.future.insert(key);
            }
            EntryState::Past => {
                self.group[i] = Group::Past;
                let key = self.past_key(idx);
                self.past.insert(key);
            }
            EntryState::Current => {
                self.group[i] = Group::Active;
                self.active.push(Member {
                    idx,
                    sequence: self.sequence[i],
                });
                self.active_len += 1;
            }
            EntryState::New => unreachable!("cannot place slot {idx} as New"),
        }
    }

    /// Classifies a pending entry and moves it into its group.
    fn classify_pending(
        &mut self,
        idx: u32,
        range_start: f64,
        range_end: f64,
        stats: &mut UpdateStats,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let i = idx as usize;
        let old = self.state[i];
        debug_assert_ne!(old, EntryState::Current, "alive slot {idx} in pending");

        let next = EntryState::classify(&self.bounds[i], range_start, range_end);
        if next == old {
            // Re-bounded entry that stays on the same side of the range.
            self.place(idx, next);
            return false;
        }
        self.transition(idx, old, next, stats, tracer)
    }

    /// Records a state change of `idx` and places it in its new group.
    ///
    /// The caller has already taken the entry out of its old group. Returns
    /// whether the entry entered or left the alive set.
    fn transition(
        &mut self,
        idx: u32,
        old: EntryState,
        next: EntryState,
        stats: &mut UpdateStats,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        debug_assert_ne!(old, next, "transition without a state change");
        let id = self.id_at(idx);
        self.place(idx, next);

        let changed = match (old, next) {
            (_, EntryState::Current) => {
                self.events.push(LifetimeEvent::BecameAlive(id));
                stats.became_alive += 1;
                true
            }
            (EntryState::Current, _) => {
                self.events.push(LifetimeEvent::BecameDead(id));
                stats.became_dead += 1;
                true
            }
            (EntryState::Future, EntryState::Past) | (EntryState::Past, EntryState::Future) => {
                // The range swallowed the whole interval in one step.
                self.events.push(LifetimeEvent::BecameAlive(id));
                self.events.push(LifetimeEvent::BecameDead(id));
                stats.became_alive += 1;
                stats.became_dead += 1;
                true
            }
            _ => false,
        };

        for &(kind, direction) in boundary::crossings(old, next) {
            self.events.push(LifetimeEvent::CrossedBoundary(BoundaryCrossing {
                entry: id,
                kind,
                direction,
            }));
            stats.boundary_crossings += 1;
        }

        #[cfg(feature = "trace-rich")]
        tracer.transition(&TransitionEvent {
            update_index: self.update_index,
            entry: id,
            from: old,
            to: next,
        });
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = tracer;
        }

        changed
    }

    /// Drains the event queue into `observer`.
    fn dispatch<O: LifetimeObserver + ?Sized>(&mut self, observer: &mut O) {
        if self.events.is_empty() {
            return;
        }

        self.dispatching = true;
        let mut queue = mem::take(&mut self.events);
        while let Some(event) = queue.pop() {
            if !self.contains(event.entry()) {
                // Removed by an earlier callback.
                continue;
            }
            match event {
                LifetimeEvent::BecameAlive(id) => observer.entry_became_alive(self, id),
                LifetimeEvent::BecameDead(id) => observer.entry_became_dead(self, id),
                LifetimeEvent::CrossedBoundary(c) => {
                    observer.entry_crossed_boundary(self, c.entry, c.kind, c.direction);
                }
            }
        }
        if self.events.is_empty() {
            self.events = queue;
        }
        self.dispatching = false;
    }

    /// Checks that every registered entry is in exactly one group matching
    /// its tag.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut pending = 0;
        let mut active = 0;
        for idx in 0..self.len {
            let i = idx as usize;
            let state = self.state[i];
            match self.group[i] {
                Group::Vacant => {}
                Group::Pending => {
                    pending += 1;
                    assert_ne!(state, EntryState::Current, "slot {idx} pending while alive");
                }
                Group::Active => {
                    active += 1;
                    assert_eq!(state, EntryState::Current, "slot {idx} active tag");
                    assert!(
                        self.active.iter().any(|m| self.holds(*m, Group::Active) && m.idx == idx),
                        "slot {idx} missing from active"
                    );
                }
                Group::Future => {
                    assert_eq!(state, EntryState::Future, "slot {idx} future tag");
                    assert!(self.future.contains(&self.future_key(idx)), "slot {idx} missing from future");
                }
                Group::Past => {
                    assert_eq!(state, EntryState::Past, "slot {idx} past tag");
                    assert!(self.past.contains(&self.past_key(idx)), "slot {idx} missing from past");
                }
            }
        }
        assert_eq!(pending, self.pending_len, "pending count");
        assert_eq!(active, self.active_len, "active count");
        assert_eq!(
            self.future.len() + self.past.len() + pending + active,
            self.len(),
            "every entry is in exactly one group"
        );
        assert!(self.future.iter().all(|k| self.group[k.idx as usize] == Group::Future), "future group holds only future slots");
        assert!(self.past.iter().all(|k| self.group[k.idx as usize] == Group::Past), "past group holds only past slots");
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
