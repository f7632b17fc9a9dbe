//! Per-slot replacement state.
//!
//! Every physical cache slot owns exactly one [`EntryState`] for its whole
//! lifetime. The state is never destroyed, only returned to probation on
//! reset or invalidation.

use std::fmt;

use crate::common::Tick;

/// Segment an entry currently belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Default tier. Preferred eviction target.
    #[default]
    Probation,
    /// Capacity-bounded tier for entries that have been re-referenced.
    Protected,
}

impl Segment {
    /// Returns `true` for [`Segment::Protected`].
    #[inline(always)]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Protected)
    }
}

/// Stable handle to an entry inside a policy's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    /// Returns the arena index behind this handle.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Segment membership and recency of one cache slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntryState {
    pub(crate) segment: Segment,
    pub(crate) last_access: Tick,
}

impl EntryState {
    /// A fresh, never-touched probationary entry.
    pub const fn new() -> Self {
        Self {
            segment: Segment::Probation,
            last_access: Tick::ZERO,
        }
    }

    /// Current segment.
    #[inline(always)]
    pub const fn segment(&self) -> Segment {
        self.segment
    }

    /// Tick of the most recent touch or reset.
    #[inline(always)]
    pub const fn last_access(&self) -> Tick {
        self.last_access
    }

    /// Returns `true` if the entry is in the protected segment.
    #[inline(always)]
    pub const fn is_protected(&self) -> bool {
        self.segment.is_protected()
    }

    /// Returns the entry to probation with the given timestamp.
    ///
    /// Tracker bookkeeping is the caller's responsibility.
    #[inline]
    pub(crate) const fn demote(&mut self, last_access: Tick) {
        self.segment = Segment::Probation;
        self.last_access = last_access;
    }
}
