//! Simulated clock.
//!
//! The policy queries logical time through the [`Clock`] trait so that the
//! owning simulator decides how time advances. [`SimClock`] is the stock
//! implementation: a cheaply cloneable handle to a shared tick counter. The
//! owner keeps one handle and advances it; the policy keeps another and reads it.

use std::cell::Cell;
use std::rc::Rc;

use tracing::warn;

use crate::common::Tick;

/// Source of monotonically non-decreasing logical time.
pub trait Clock {
    /// Returns the current tick.
    fn now(&self) -> Tick;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Tick {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    #[inline]
    fn now(&self) -> Tick {
        (**self).now()
    }
}

/// Shared tick counter for single-threaded simulations.
///
/// Clones observe and advance the same counter. The handle is `!Send`, which
/// matches the serialized execution model of the policy.
///
/// # Examples
///
/// ```
/// use slru_core::sim::{Clock, SimClock};
///
/// let clock = SimClock::new();
/// let reader = clock.clone();
/// clock.advance(3);
/// assert_eq!(reader.now().val(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    tick: Rc<Cell<Tick>>,
}

impl SimClock {
    /// Creates a clock positioned at [`Tick::ZERO`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock positioned at `start`.
    pub fn starting_at(start: Tick) -> Self {
        Self {
            tick: Rc::new(Cell::new(start)),
        }
    }

    /// Advances the clock by `delta` ticks.
    pub fn advance(&self, delta: u64) {
        self.tick.set(self.tick.get().saturating_add(delta));
    }

    /// Moves the clock to `tick`.
    ///
    /// Time never runs backwards. Debug builds assert on a backwards move;
    /// release builds keep the current time and log a warning.
    pub fn set(&self, tick: Tick) {
        let current = self.tick.get();
        debug_assert!(
            tick >= current,
            "SimClock moved backwards from {current} to {tick}"
        );
        if tick < current {
            warn!(%current, requested = %tick, "ignoring backwards clock update");
            return;
        }
        self.tick.set(tick);
    }
}

impl Clock for SimClock {
    #[inline]
    fn now(&self) -> Tick {
        self.tick.get()
    }
}
