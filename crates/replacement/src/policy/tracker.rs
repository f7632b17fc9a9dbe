//! Protected-segment tracker.
//!
//! One tracker is shared by every entry a policy governs. It records which
//! entries currently occupy the protected segment, in promotion order, and
//! bounds that set by the configured capacity. Probation membership is
//! implicit: any entry not tracked here is probationary.
//!
//! # Performance
//!
//! - `insert()`: O(1)
//! - `remove()` / `contains()` / `least_recent()`: O(P) where P is the protected capacity
//! - **Space Complexity:** O(P)

use super::entry::{EntryId, EntryState, Segment};
use crate::common::{InvariantViolation, Tick};

/// Membership list of the protected segment.
#[derive(Clone, Debug)]
pub struct SegmentTracker {
    protected_capacity: usize,
    probation_capacity: usize,
    protected_count: usize,
    /// Promotion order; index 0 is the oldest promotion still resident.
    members: Vec<EntryId>,
}

impl SegmentTracker {
    /// Creates an empty tracker.
    ///
    /// # Arguments
    ///
    /// * `protected_capacity` - Maximum number of protected entries.
    /// * `probation_capacity` - Nominal probation size, recorded but not enforced.
    pub fn new(protected_capacity: usize, probation_capacity: usize) -> Self {
        Self {
            protected_capacity,
            probation_capacity,
            protected_count: 0,
            members: Vec::with_capacity(protected_capacity),
        }
    }

    /// Maximum number of protected entries.
    #[inline]
    pub const fn protected_capacity(&self) -> usize {
        self.protected_capacity
    }

    /// Nominal probation size.
    #[inline]
    pub const fn probation_capacity(&self) -> usize {
        self.probation_capacity
    }

    /// Number of entries currently protected.
    #[inline]
    pub const fn protected_count(&self) -> usize {
        self.protected_count
    }

    /// Returns `true` when no more entries can be promoted without a demotion.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.protected_count >= self.protected_capacity
    }

    /// Protected entries in promotion order.
    #[inline]
    pub fn members(&self) -> &[EntryId] {
        &self.members
    }

    /// Returns `true` if `id` is tracked.
    pub fn contains(&self, id: EntryId) -> bool {
        self.members.contains(&id)
    }

    /// Adds `id` to the protected set.
    ///
    /// The caller must have checked [`is_full`](Self::is_full).
    pub(crate) fn insert(&mut self, id: EntryId) {
        debug_assert!(!self.is_full(), "promotion into a full protected segment");
        debug_assert!(!self.contains(id), "entry {id} promoted twice");
        self.members.push(id);
        self.protected_count += 1;
    }

    /// Removes `id` from the protected set. Returns `false` if it was absent.
    pub(crate) fn remove(&mut self, id: EntryId) -> bool {
        match self.members.iter().position(|&m| m == id) {
            Some(pos) => {
                let _ = self.members.remove(pos);
                self.protected_count -= 1;
                true
            }
            None => false,
        }
    }

    /// Swaps the member at `pos` out for `id`, keeping the count unchanged.
    ///
    /// The incoming entry goes to the back of the promotion order. Returns the
    /// entry that left.
    pub(crate) fn replace_at(&mut self, pos: usize, id: EntryId) -> EntryId {
        let outgoing = self.members.remove(pos);
        self.members.push(id);
        outgoing
    }

    /// Finds the protected member with the oldest `last_access`.
    ///
    /// Ties resolve to the earliest member in promotion order. Returns the
    /// member's position in [`members`](Self::members) and its id.
    pub fn least_recent(&self, entries: &[EntryState]) -> Option<(usize, EntryId)> {
        let mut best: Option<(usize, EntryId)> = None;
        let mut oldest = Tick::MAX;
        for (pos, &id) in self.members.iter().enumerate() {
            let last = entries[id.index()].last_access;
            if best.is_none() || last < oldest {
                oldest = last;
                best = Some((pos, id));
            }
        }
        best
    }

    /// Verifies the tracker against the entry arena.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check(&self, entries: &[EntryState]) -> Result<(), InvariantViolation> {
        if self.protected_count != self.members.len() {
            return Err(InvariantViolation::CountMismatch {
                count: self.protected_count,
                members: self.members.len(),
            });
        }
        if self.protected_count > self.protected_capacity {
            return Err(InvariantViolation::OverCapacity {
                count: self.protected_count,
                capacity: self.protected_capacity,
            });
        }
        for (pos, &id) in self.members.iter().enumerate() {
            let Some(entry) = entries.get(id.index()) else {
                return Err(InvariantViolation::UnknownEntry(id));
            };
            if entry.segment != Segment::Protected {
                return Err(InvariantViolation::StrayMember(id));
            }
            if self.members[..pos].contains(&id) {
                return Err(InvariantViolation::DuplicateMember(id));
            }
        }
        for (index, entry) in entries.iter().enumerate() {
            let id = EntryId(index);
            if entry.segment == Segment::Protected && !self.contains(id) {
                return Err(InvariantViolation::MissingMember(id));
            }
        }
        Ok(())
    }
}
