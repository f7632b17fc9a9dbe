//! Replacement statistics collection and reporting.
//!
//! This module tracks event counts for the policy and its owning cache. It provides:
//! 1. **Policy events:** Touches, promotions, demotions, fallback evictions.
//! 2. **Cache events:** Hits, misses, fills, evictions, write-backs, invalidations.
//! 3. **Reporting:** Plain-text dumps in the simulator's `name  value` layout.

/// Event counters maintained by [`Slru`](crate::policy::Slru).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlruStats {
    /// Calls to `touch`.
    pub touches: u64,
    /// Probation → protected transitions caused by a touch.
    pub promotions: u64,
    /// Protected → probation transitions made to admit a promotion.
    pub demotions: u64,
    /// Victims taken from the protected segment because no probationary
    /// candidate existed.
    pub fallback_demotions: u64,
    /// Calls to `get_victim`.
    pub victims: u64,
    /// Calls to `reset`.
    pub resets: u64,
    /// Calls to `invalidate`.
    pub invalidations: u64,
}

impl SlruStats {
    /// Fraction of touches that led to a promotion.
    pub fn promotion_rate(&self) -> f64 {
        if self.touches == 0 {
            0.0
        } else {
            self.promotions as f64 / self.touches as f64
        }
    }

    /// Prints the counters to stdout.
    pub fn print(&self) {
        println!("SLRU REPLACEMENT");
        println!("  slru.touches              {}", self.touches);
        println!(
            "  slru.promotions           {} ({:.2}%)",
            self.promotions,
            self.promotion_rate() * 100.0
        );
        println!("  slru.demotions            {}", self.demotions);
        println!("  slru.fallback_demotions   {}", self.fallback_demotions);
        println!("  slru.victims              {}", self.victims);
        println!("  slru.resets               {}", self.resets);
        println!("  slru.invalidations        {}", self.invalidations);
    }
}

/// Event counters maintained by [`CacheSim`](crate::cache::CacheSim).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Accesses that found their line resident.
    pub hits: u64,
    /// Accesses that had to install a line.
    pub misses: u64,
    /// Lines installed (one per miss).
    pub fills: u64,
    /// Fills that displaced a valid line.
    pub evictions: u64,
    /// Dirty lines written back on eviction or invalidation.
    pub writebacks: u64,
    /// Lines dropped by `invalidate` or `flush`.
    pub invalidations: u64,
}

impl CacheStats {
    /// Total number of accesses.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate in `[0, 1]`; zero when there were no accesses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Prints the counters to stdout.
    pub fn print(&self) {
        println!("==========================================================");
        println!("CACHE STATISTICS");
        println!("==========================================================");
        println!("  cache.accesses            {}", self.accesses());
        println!(
            "  cache.hits                {} ({:.2}%)",
            self.hits,
            self.hit_rate() * 100.0
        );
        println!("  cache.misses              {}", self.misses);
        println!("  cache.fills               {}", self.fills);
        println!("  cache.evictions           {}", self.evictions);
        println!("  cache.writebacks          {}", self.writebacks);
        println!("  cache.invalidations       {}", self.invalidations);
        println!("----------------------------------------------------------");
    }
}
