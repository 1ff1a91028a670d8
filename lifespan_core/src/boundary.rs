// Copyright 2026 the Lifespan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary-crossing events.
//!
//! Besides the coarse alive/dead notifications, the manager reports which
//! bound of an interval the moving range passed and in which direction. The
//! mapping from a state transition to its crossings is fixed:
//!
//! | old → new          | crossings                        |
//! |--------------------|----------------------------------|
//! | Future → Current   | Start/Forward                    |
//! | Future → Past      | Start/Forward, End/Forward       |
//! | Current → Past     | End/Forward                      |
//! | Current → Future   | Start/Backward                   |
//! | Past → Current     | End/Backward                     |
//! | Past → Future      | End/Backward, Start/Backward     |
//!
//! The two-hop rows occur when a single range jump swallows (or un-swallows)
//! an entire interval. Transitions out of [`EntryState::New`] produce no
//! crossings.

use crate::entry::{EntryId, EntryState};

/// Which bound of an interval was crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// The inclusive start bound.
    Start,
    /// The exclusive end bound.
    End,
}

/// The direction in which a bound was crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrossingDirection {
    /// Time increased past the bound.
    Forward,
    /// Time decreased past the bound.
    Backward,
}

/// A single boundary crossing of one entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundaryCrossing {
    /// The entry whose bound was crossed.
    pub entry: EntryId,
    /// Which bound.
    pub kind: BoundaryKind,
    /// Which direction.
    pub direction: CrossingDirection,
}

const START_FORWARD: (BoundaryKind, CrossingDirection) =
    (BoundaryKind::Start, CrossingDirection::Forward);
const END_FORWARD: (BoundaryKind, CrossingDirection) =
    (BoundaryKind::End, CrossingDirection::Forward);
const START_BACKWARD: (BoundaryKind, CrossingDirection) =
    (BoundaryKind::Start, CrossingDirection::Backward);
const END_BACKWARD: (BoundaryKind, CrossingDirection) =
    (BoundaryKind::End, CrossingDirection::Backward);

/// Returns the crossings implied by a transition, in emission order.
///
/// Returns an empty slice for unchanged states and for transitions out of
/// [`EntryState::New`].
#[must_use]
pub fn crossings(
    old: EntryState,
    new: EntryState,
) -> &'static [(BoundaryKind, CrossingDirection)] {
    match (old, new) {
        (EntryState::Future, EntryState::Current) => &[START_FORWARD],
        (EntryState::Future, EntryState::Past) => &[START_FORWARD, END_FORWARD],
        (EntryState::Current, EntryState::Past) => &[END_FORWARD],
        (EntryState::Current, EntryState::Future) => &[START_BACKWARD],
        (EntryState::Past, EntryState::Current) => &[END_BACKWARD],
        (EntryState::Past, EntryState::Future) => &[END_BACKWARD, START_BACKWARD],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_hop_rows() {
        assert_eq!(
            crossings(EntryState::Future, EntryState::Current),
            &[(BoundaryKind::Start, CrossingDirection::Forward)]
        );
        assert_eq!(
            crossings(EntryState::Current, EntryState::Past),
            &[(BoundaryKind::End, CrossingDirection::Forward)]
        );
        assert_eq!(
            crossings(EntryState::Current, EntryState::Future),
            &[(BoundaryKind::Start, CrossingDirection::Backward)]
        );
        assert_eq!(
            crossings(EntryState::Past, EntryState::Current),
            &[(BoundaryKind::End, CrossingDirection::Backward)]
        );
    }

    #[test]
    fn two_hop_rows_are_ordered() {
        assert_eq!(
            crossings(EntryState::Future, EntryState::Past),
            &[
                (BoundaryKind::Start, CrossingDirection::Forward),
                (BoundaryKind::End, CrossingDirection::Forward),
            ]
        );
        assert_eq!(
            crossings(EntryState::Past, EntryState::Future),
            &[
                (BoundaryKind::End, CrossingDirection::Backward),
                (BoundaryKind::Start, CrossingDirection::Backward),
            ]
        );
    }

    #[test]
    fn new_and_unchanged_emit_nothing() {
        for state in [
            EntryState::Future,
            EntryState::Current,
            EntryState::Past,
        ] {
            assert!(crossings(EntryState::New, state).is_empty());
            assert!(crossings(state, state).is_empty());
        }
    }
}
