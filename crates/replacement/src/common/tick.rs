//! Logical time.
//!
//! The replacement policy never looks at wall-clock time. Recency is compared
//! using simulator ticks, a monotonically non-decreasing event counter supplied
//! by the [`Clock`](crate::sim::Clock) collaborator.

use std::fmt;

/// A point in simulated (logical) time.
///
/// Ticks are totally ordered. [`Tick::ZERO`] doubles as the "never touched"
/// sentinel: an invalidated entry carries it so that it sorts as maximally
/// stale against every live entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(pub u64);

impl Tick {
    /// The start of simulated time and the "never touched" sentinel.
    pub const ZERO: Self = Self(0);

    /// The largest representable tick.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates a tick from a raw counter value.
    #[inline(always)]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is the "never touched" sentinel.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns this tick advanced by `delta`, saturating at [`Tick::MAX`].
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, delta: u64) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

impl From<u64> for Tick {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
