//! Set-Associative Tag Store.
//!
//! A minimal cache model that owns an [`SlruPolicy`] and drives it the way a
//! simulator's tag store does: hits call `update`, fills ask for a victim and
//! then `reset` the chosen way, and discarded lines are `invalidate`d. Only
//! tags and valid/dirty bits are modelled; there is no data array.
//!
//! Each access advances the shared [`SimClock`] by one tick before the policy
//! sees it, so every access has a distinct timestamp.

use tracing::trace;

use crate::common::ConfigError;
use crate::config::CacheConfig;
use crate::policy::{ReplacementPolicy, SlruPolicy};
use crate::sim::SimClock;
use crate::stats::CacheStats;

/// Cache line entry containing tag, validity, and dirty bits.
#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
    dirty: bool,
}

/// Set-associative cache whose replacement decisions are made by SLRU.
#[derive(Debug)]
pub struct CacheSim {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    line_bytes: usize,
    clock: SimClock,
    policy: SlruPolicy<SimClock>,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates a cache with its own clock starting at tick zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry or segment sizes are invalid.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SimClock::new())
    }

    /// Creates a cache that shares `clock` with the rest of the simulation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry or segment sizes are invalid.
    pub fn with_clock(config: &CacheConfig, clock: SimClock) -> Result<Self, ConfigError> {
        let num_sets = config.sets()?;
        let policy = SlruPolicy::new(num_sets, config.ways, &config.slru, clock.clone())?;
        Ok(Self {
            lines: vec![CacheLine::default(); num_sets * config.ways],
            num_sets,
            ways: config.ways,
            line_bytes: config.line_bytes,
            clock,
            policy,
            stats: CacheStats::default(),
        })
    }

    /// Checks if the cache contains the specified address.
    pub fn contains(&self, addr: u64) -> bool {
        let (set, tag) = self.locate(addr);
        self.find_way(set, tag).is_some()
    }

    /// Accesses the cache for the specified address.
    ///
    /// On a hit the policy is updated. On a miss a victim way is chosen by the
    /// policy (invalid ways carry the oldest possible timestamp and are taken
    /// first), the line is installed and the policy is reset for that way.
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    pub fn access(&mut self, addr: u64, is_write: bool) -> bool {
        self.clock.advance(1);
        let (set, tag) = self.locate(addr);

        if let Some(way) = self.find_way(set, tag) {
            self.policy.update(set, way);
            if is_write {
                self.lines[set * self.ways + way].dirty = true;
            }
            self.stats.hits += 1;
            return true;
        }

        self.stats.misses += 1;
        self.install_line(set, tag, is_write);
        false
    }

    /// Drops the line holding `addr`, if present.
    ///
    /// # Returns
    ///
    /// `true` if a line was invalidated.
    pub fn invalidate(&mut self, addr: u64) -> bool {
        let (set, tag) = self.locate(addr);
        let Some(way) = self.find_way(set, tag) else {
            return false;
        };
        self.drop_line(set, way);
        true
    }

    /// Invalidates every resident line.
    pub fn flush(&mut self) {
        for set in 0..self.num_sets {
            for way in 0..self.ways {
                if self.lines[set * self.ways + way].valid {
                    self.drop_line(set, way);
                }
            }
        }
    }

    /// Number of sets.
    pub const fn sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// The replacement policy.
    pub const fn policy(&self) -> &SlruPolicy<SimClock> {
        &self.policy
    }

    /// The clock shared with the policy.
    pub const fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Cache event counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Set index and tag of `addr`.
    fn locate(&self, addr: u64) -> (usize, u64) {
        let block = addr / self.line_bytes as u64;
        let set = (block % self.num_sets as u64) as usize;
        let tag = block / self.num_sets as u64;
        (set, tag)
    }

    fn find_way(&self, set: usize, tag: u64) -> Option<usize> {
        let base = set * self.ways;
        self.lines[base..base + self.ways]
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    fn install_line(&mut self, set: usize, tag: u64, is_write: bool) {
        let way = self.policy.get_victim(set);
        let line = &mut self.lines[set * self.ways + way];
        if line.valid {
            self.stats.evictions += 1;
            if line.dirty {
                self.stats.writebacks += 1;
            }
            trace!(set, way, old_tag = line.tag, new_tag = tag, "evict");
        }
        *line = CacheLine {
            tag,
            valid: true,
            dirty: is_write,
        };
        self.stats.fills += 1;
        self.policy.reset(set, way);
    }

    fn drop_line(&mut self, set: usize, way: usize) {
        let line = &mut self.lines[set * self.ways + way];
        if line.dirty {
            self.stats.writebacks += 1;
        }
        *line = CacheLine::default();
        self.stats.invalidations += 1;
        self.policy.invalidate(set, way);
    }
}
