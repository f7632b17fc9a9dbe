//! # Unit Components
//!
//! Tests grouped by the module they exercise.


/// Configuration defaults, deserialization and validation.
pub mod config;


/// Policy engine, tracker and set/way adapter.
pub mod policy;

/// Clock collaborator.
pub mod sim;
