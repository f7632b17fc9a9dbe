//! SLRU over a set-associative grid.
//!
//! One [`Slru`] instance covers every line of the cache, so the protected
//! segment is global rather than per set. A set can therefore end up with no
//! probationary way at all, which is exactly when the victim-selection
//! fallback matters.

use tracing::warn;

use super::entry::{EntryId, EntryState};
use super::{ReplacementPolicy, Slru};
use crate::common::ConfigError;
use crate::config::SlruConfig;
use crate::sim::Clock;

/// SLRU policy state for a `sets × ways` cache.
#[derive(Debug)]
pub struct SlruPolicy<C: Clock> {
    slru: Slru<C>,
    sets: usize,
    ways: usize,
}

impl<C: Clock> SlruPolicy<C> {
    /// Creates a policy with one entry per line.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    /// * `config` - Segment sizes and victim-selection behaviour.
    /// * `clock` - Source of logical time.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the segment sizes are invalid or the grid
    /// is empty.
    pub fn new(
        sets: usize,
        ways: usize,
        config: &SlruConfig,
        clock: C,
    ) -> Result<Self, ConfigError> {
        if sets == 0 || ways == 0 {
            return Err(ConfigError::InvalidGeometry {
                reason: "a replacement grid needs at least one set and one way",
                size_bytes: 0,
                line_bytes: 0,
                ways,
            });
        }
        let Some(lines) = sets.checked_mul(ways) else {
            return Err(ConfigError::InvalidGeometry {
                reason: "sets * ways overflows",
                size_bytes: 0,
                line_bytes: 0,
                ways,
            });
        };
        let mut slru = Slru::with_capacity(config, clock, lines)?;
        for _ in 0..lines {
            let _ = slru.instantiate();
        }
        if config.protected_size + config.probation_size != lines {
            warn!(
                lines,
                protected_size = config.protected_size,
                probation_size = config.probation_size,
                "segment sizes do not add up to the number of lines"
            );
        }
        Ok(Self { slru, sets, ways })
    }

    /// Number of sets.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Entry handle of `(set, way)`.
    ///
    /// # Panics
    ///
    /// Panics if `set` or `way` is out of range.
    pub fn entry_id(&self, set: usize, way: usize) -> EntryId {
        assert!(
            set < self.sets && way < self.ways,
            "({set}, {way}) outside a {}x{} cache",
            self.sets,
            self.ways
        );
        EntryId(set * self.ways + way)
    }

    /// Replacement state of `(set, way)`.
    ///
    /// # Panics
    ///
    /// Panics if `set` or `way` is out of range.
    pub fn state(&self, set: usize, way: usize) -> &EntryState {
        self.slru.entry(self.entry_id(set, way))
    }

    /// The underlying policy engine.
    pub const fn engine(&self) -> &Slru<C> {
        &self.slru
    }

    /// Candidate handles for `set`, in way order.
    fn candidates(&self, set: usize) -> Vec<EntryId> {
        (0..self.ways).map(|way| self.entry_id(set, way)).collect()
    }
}

impl<C: Clock> ReplacementPolicy for SlruPolicy<C> {
    fn update(&mut self, set: usize, way: usize) {
        let id = self.entry_id(set, way);
        self.slru.touch(id);
    }

    fn reset(&mut self, set: usize, way: usize) {
        let id = self.entry_id(set, way);
        self.slru.reset(id);
    }

    fn invalidate(&mut self, set: usize, way: usize) {
        let id = self.entry_id(set, way);
        self.slru.invalidate(id);
    }

    /// Identifies the victim way to evict.
    ///
    /// All ways of `set` compete; the result is the way of the entry chosen
    /// by [`Slru::get_victim`].
    fn get_victim(&mut self, set: usize) -> usize {
        let candidates = self.candidates(set);
        let victim = self.slru.get_victim(&candidates);
        victim.index() % self.ways
    }
}
