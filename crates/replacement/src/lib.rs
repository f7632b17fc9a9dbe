//! Segmented-LRU cache replacement for cycle-level simulators.
//!
//! This crate implements the replacement side of a simulated cache:
//! 1. **Policy:** SLRU state machine with a capacity-bounded protected segment,
//!    promotion on re-reference and LRU demotion (`policy`).
//! 2. **Time:** The logical clock collaborator the policy timestamps with (`sim`).
//! 3. **Owner:** A set-associative tag store that drives the policy (`cache`).
//! 4. **Configuration:** serde-backed parameters and validation (`config`).
//! 5. **Statistics:** Policy and cache event counters (`stats`).
//!
//! # Examples
//!
//! ```
//! use slru_core::config::SlruConfig;
//! use slru_core::policy::{Segment, Slru};
//! use slru_core::sim::SimClock;
//!
//! let clock = SimClock::new();
//! let mut policy = Slru::new(&SlruConfig::new(1, 3), clock.clone()).unwrap();
//! let a = policy.instantiate();
//! let b = policy.instantiate();
//!
//! clock.advance(1);
//! policy.reset(a);
//! clock.advance(1);
//! policy.reset(b);
//! clock.advance(1);
//! policy.touch(a);
//!
//! assert_eq!(policy.entry(a).segment(), Segment::Protected);
//! assert_eq!(policy.get_victim(&[a, b]), b);
//! ```

/// Logical time and error types.
pub mod common;
/// Policy and cache configuration.
pub mod config;
/// Set-associative tag store driving the policy.
pub mod cache;
/// SLRU policy engine and the set/way replacement interface.
pub mod policy;
/// Logical clock collaborator.
pub mod sim;
/// Policy and cache statistics.
pub mod stats;

/// Cache model; build with `CacheSim::new(&CacheConfig)`.
pub use crate::cache::CacheSim;
/// Root configuration types.
pub use crate::config::{CacheConfig, SlruConfig, VictimSelection};
/// Policy engine and handles.
pub use crate::policy::{EntryId, EntryState, ReplacementPolicy, Segment, Slru, SlruPolicy};
/// Clock collaborator.
pub use crate::sim::{Clock, SimClock};
