//! Common types shared across the crate.
//!
//! This module provides:
//! 1. **Logical time:** The [`Tick`] newtype used for all recency comparisons.
//! 2. **Error handling:** Configuration errors and invariant-violation reports.

/// Error types for configuration and invariant checking.
pub mod error;

/// Logical time type.
pub mod tick;

pub use error::{ConfigError, InvariantViolation};
pub use tick::Tick;
