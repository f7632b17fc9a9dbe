//! Cache Replacement Policy.
//!
//! Implements segmented-LRU victim selection for set-associative caches.
//!
//! # Layers
//!
//! - [`EntryState`]: Per-slot segment and recency, addressed by [`EntryId`].
//! - [`SegmentTracker`]: The shared, capacity-bounded protected set.
//! - [`Slru`]: The policy engine operating on entry handles.
//! - [`SlruPolicy`]: [`Slru`] laid out over a `sets × ways` grid, implementing
//!   [`ReplacementPolicy`] for use by a tag store.

/// Per-entry replacement state.
pub mod entry;

/// Set/way adapter over the policy engine.
pub mod set_assoc;

/// The SLRU policy engine.
pub mod slru;

/// Protected-segment membership tracking.
pub mod tracker;

pub use entry::{EntryId, EntryState, Segment};
pub use set_assoc::SlruPolicy;
pub use slru::Slru;
pub use tracker::SegmentTracker;

/// Trait for cache replacement policies.
///
/// Defines the interface a tag store uses to report line lifecycle events
/// and to ask for victims, in set/way coordinates.
///
/// Policies are owned and driven by one tag store on one thread, so the
/// trait carries no `Send + Sync` bound; [`SimClock`](crate::sim::SimClock)
/// is `!Send`.
pub trait ReplacementPolicy {
    /// Updates the policy state when a resident line is hit.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    fn update(&mut self, set: usize, way: usize);

    /// Notifies the policy that a line was just installed in `(set, way)`.
    fn reset(&mut self, set: usize, way: usize);

    /// Notifies the policy that the line in `(set, way)` was discarded.
    fn invalidate(&mut self, set: usize, way: usize);

    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&mut self, set: usize) -> usize;
}
