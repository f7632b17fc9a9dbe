//! Segmented LRU (SLRU) Replacement Policy.
//!
//! Entries are split into a probationary segment and a capacity-bounded
//! protected segment. A line enters probation when it is filled and earns
//! protection only when it is hit again, so a one-time scan cannot flush the
//! protected set. When the protected segment is full, admitting a new entry
//! demotes the least recently accessed protected entry back to probation.
//!
//! Victims are taken from probation first (oldest `last_access`). If every
//! candidate of a set is protected, the configured [`VictimSelection`]
//! decides: demote the oldest protected candidate and return it, or treat the
//! request as a caller contract violation.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(P) where P is the protected capacity (linear LRU scan when full)
//!   - `reset()` / `invalidate()`: O(P) for protected entries, O(1) otherwise
//!   - `get_victim()`: O(W + P) where W is the number of candidates
//! - **Space Complexity:** O(N + P) where N is the number of entries
//! - **Best Case:** Mixed workloads with a hot working set and one-off scans
//! - **Worst Case:** Working sets larger than the protected segment that are
//!   re-referenced cyclically (constant promotion/demotion churn)

use tracing::{debug, trace, warn};

use super::entry::{EntryId, EntryState, Segment};
use super::tracker::SegmentTracker;
use crate::common::{ConfigError, InvariantViolation, Tick};
use crate::config::{SlruConfig, VictimSelection};
use crate::sim::Clock;
use crate::stats::SlruStats;

/// SLRU policy state: the entry arena, the protected-segment tracker and the
/// clock used to timestamp accesses.
#[derive(Debug)]
pub struct Slru<C: Clock> {
    entries: Vec<EntryState>,
    tracker: SegmentTracker,
    clock: C,
    victim_selection: VictimSelection,
    stats: SlruStats,
}

impl<C: Clock> Slru<C> {
    /// Creates a policy with no entries.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either segment size is zero.
    pub fn new(config: &SlruConfig, clock: C) -> Result<Self, ConfigError> {
        Self::with_capacity(config, clock, 0)
    }

    /// Creates a policy whose arena is pre-sized for `entries` slots.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either segment size is zero.
    pub fn with_capacity(
        config: &SlruConfig,
        clock: C,
        entries: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            protected_size = config.protected_size,
            probation_size = config.probation_size,
            victim_selection = ?config.victim_selection,
            "SLRU policy created"
        );
        Ok(Self {
            entries: Vec::with_capacity(entries),
            tracker: SegmentTracker::new(config.protected_size, config.probation_size),
            clock,
            victim_selection: config.victim_selection,
            stats: SlruStats::default(),
        })
    }

    /// Allocates replacement state for a new cache slot.
    ///
    /// The entry starts in probation with the "never touched" timestamp.
    pub fn instantiate(&mut self) -> EntryId {
        let id = EntryId(self.entries.len());
        self.entries.push(EntryState::new());
        id
    }

    /// Records a hit on `id`, promoting it out of probation if needed.
    ///
    /// A probationary entry is promoted straight away while the protected
    /// segment has room. Otherwise the protected entry with the oldest access
    /// is demoted (its timestamp is left alone) to make space.
    ///
    /// The fill is expected to go through [`reset`](Self::reset), which leaves
    /// the entry in probation. A freshly instantiated entry that is touched
    /// without a prior `reset` is therefore promoted by that first touch.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this policy.
    pub fn touch(&mut self, id: EntryId) {
        self.assert_known(id);
        let now = self.clock.now();
        self.stats.touches += 1;

        if !self.entries[id.index()].is_protected() {
            if self.tracker.is_full() {
                self.demote_least_recent(id);
            } else {
                self.tracker.insert(id);
            }
            self.entries[id.index()].segment = Segment::Protected;
            self.stats.promotions += 1;
            debug!(entry = %id, protected = self.tracker.protected_count(), "promoted");
        }

        self.entries[id.index()].last_access = now;
        trace!(entry = %id, %now, "touch");
        self.debug_check_counts();
    }

    /// Prepares `id` to hold freshly inserted data.
    ///
    /// The entry leaves the protected segment if it was there and is stamped
    /// with the current tick, so it does not look stale next to invalidated
    /// slots.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this policy.
    pub fn reset(&mut self, id: EntryId) {
        self.assert_known(id);
        let now = self.clock.now();
        self.release(id);
        self.entries[id.index()].demote(now);
        self.stats.resets += 1;
        trace!(entry = %id, %now, "reset");
        self.debug_check_counts();
    }

    /// Discards `id`'s recency so it becomes the most attractive victim.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this policy.
    pub fn invalidate(&mut self, id: EntryId) {
        self.assert_known(id);
        self.release(id);
        self.entries[id.index()].demote(Tick::ZERO);
        self.stats.invalidations += 1;
        trace!(entry = %id, "invalidate");
        self.debug_check_counts();
    }

    /// Chooses which of `candidates` should be evicted.
    ///
    /// The oldest probationary candidate wins, regardless of how old the
    /// protected candidates are; ties go to the first candidate in slice
    /// order. With [`VictimSelection::DemoteProtected`] a fully protected
    /// candidate set yields its oldest member, which is demoted and stamped
    /// with the current tick before being returned.
    ///
    /// The caller maps the returned id back to its slot and is expected to
    /// [`reset`](Self::reset) it once the new line is installed.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty, if any candidate is unknown, or if
    /// every candidate is protected under [`VictimSelection::Strict`].
    pub fn get_victim(&mut self, candidates: &[EntryId]) -> EntryId {
        assert!(
            !candidates.is_empty(),
            "get_victim requires at least one candidate"
        );
        self.stats.victims += 1;

        let mut oldest_probation: Option<(EntryId, Tick)> = None;
        let mut oldest_protected: Option<(EntryId, Tick)> = None;
        for &id in candidates {
            self.assert_known(id);
            let state = &self.entries[id.index()];
            let slot = if state.is_protected() {
                &mut oldest_protected
            } else {
                &mut oldest_probation
            };
            match *slot {
                Some((_, oldest)) if state.last_access >= oldest => {}
                _ => *slot = Some((id, state.last_access)),
            }
        }

        match (oldest_probation, oldest_protected) {
            (Some((victim, _)), _) => {
                trace!(entry = %victim, "victim from probation");
                victim
            }
            (None, Some((victim, _))) => self.evict_protected(victim, candidates.len()),
            (None, None) => unreachable!("a non-empty candidate set always yields a victim"),
        }
    }

    /// Replacement state of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this policy.
    pub fn entry(&self, id: EntryId) -> &EntryState {
        self.assert_known(id);
        &self.entries[id.index()]
    }

    /// All entry states, indexed by [`EntryId::index`].
    pub fn entries(&self) -> &[EntryState] {
        &self.entries
    }

    /// Number of instantiated entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries have been instantiated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries in the protected segment.
    pub const fn protected_count(&self) -> usize {
        self.tracker.protected_count()
    }

    /// Configured protected-segment capacity.
    pub const fn protected_capacity(&self) -> usize {
        self.tracker.protected_capacity()
    }

    /// Configured (advisory) probation size.
    pub const fn probation_capacity(&self) -> usize {
        self.tracker.probation_capacity()
    }

    /// Protected entries in promotion order.
    pub fn protected_members(&self) -> &[EntryId] {
        self.tracker.members()
    }

    /// The protected-segment tracker.
    pub const fn tracker(&self) -> &SegmentTracker {
        &self.tracker
    }

    /// Active fallback behaviour for fully protected candidate sets.
    pub const fn victim_selection(&self) -> VictimSelection {
        self.victim_selection
    }

    /// The clock this policy reads.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Event counters.
    pub const fn stats(&self) -> &SlruStats {
        &self.stats
    }

    /// Verifies the capacity invariant and that every protected entry is
    /// tracked exactly once (and nothing else is).
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.tracker.check(&self.entries)
    }

    /// Makes room in a full protected segment for `incoming`.
    fn demote_least_recent(&mut self, incoming: EntryId) {
        let Some((pos, lru)) = self.tracker.least_recent(&self.entries) else {
            // Zero capacity is rejected at construction.
            unreachable!("full protected segment has no members");
        };
        let _ = self.tracker.replace_at(pos, incoming);
        self.entries[lru.index()].segment = Segment::Probation;
        self.stats.demotions += 1;
        debug!(
            entry = %lru,
            last_access = %self.entries[lru.index()].last_access,
            replaced_by = %incoming,
            "demoted to probation"
        );
    }

    /// Fallback path of [`get_victim`](Self::get_victim).
    fn evict_protected(&mut self, victim: EntryId, candidates: usize) -> EntryId {
        assert!(
            self.victim_selection != VictimSelection::Strict,
            "no probationary entry among {candidates} candidates (strict victim selection)"
        );
        let now = self.clock.now();
        self.release(victim);
        self.entries[victim.index()].demote(now);
        self.stats.fallback_demotions += 1;
        debug!(entry = %victim, %now, "all candidates protected; evicting demoted entry");
        self.debug_check_counts();
        victim
    }

    /// Drops `id` from the tracker if it is protected.
    fn release(&mut self, id: EntryId) {
        if !self.entries[id.index()].is_protected() {
            return;
        }
        let removed = self.tracker.remove(id);
        debug_assert!(removed, "entry {id} is protected but not tracked");
        if !removed {
            warn!(entry = %id, "protected entry missing from tracker; treating as probation");
        }
    }

    #[inline]
    fn assert_known(&self, id: EntryId) {
        assert!(
            id.index() < self.entries.len(),
            "entry {id} does not belong to this policy ({} entries)",
            self.entries.len()
        );
    }

    #[inline]
    fn debug_check_counts(&self) {
        debug_assert_eq!(
            self.tracker.protected_count(),
            self.tracker.members().len(),
            "protected count out of sync"
        );
        debug_assert!(
            self.tracker.protected_count() <= self.tracker.protected_capacity(),
            "protected segment over capacity"
        );
    }
}
