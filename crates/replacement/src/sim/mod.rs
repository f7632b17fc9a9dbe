//! Simulation collaborators.
//!
//! The replacement policy depends on exactly one external collaborator: a
//! source of logical time. This module defines that interface and the
//! counter-backed implementation used by [`CacheSim`](crate::cache::CacheSim).

/// Logical clock trait and shared tick counter.
pub mod clock;

pub use clock::{Clock, SimClock};
