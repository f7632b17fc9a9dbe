//! Error definitions.
//!
//! Two families of errors exist in this crate:
//! 1. **Configuration errors:** Recoverable problems building a policy or cache
//!    from user-supplied parameters (zero capacities, bad geometry, malformed JSON).
//! 2. **Invariant violations:** Reported by `check_invariants` when the segment
//!    tracker and the entry states disagree. These indicate a defect, never a
//!    runtime condition; debug builds assert on them after every mutation.
//!
//! Caller contract failures (an empty candidate set, an unknown entry handle)
//! are not represented here. They panic at the call site.

use std::path::PathBuf;

use thiserror::Error;

use crate::policy::EntryId;

/// Errors raised while building a policy or cache from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `protected_size` was zero.
    #[error("protected_size must be greater than zero")]
    ZeroProtectedSize,

    /// `probation_size` was zero.
    #[error("probation_size must be greater than zero")]
    ZeroProbationSize,

    /// The cache geometry cannot be mapped onto sets and ways.
    #[error("invalid cache geometry: {reason} (size={size_bytes}, line={line_bytes}, ways={ways})")]
    InvalidGeometry {
        /// Human readable description of what is wrong.
        reason: &'static str,
        /// Total cache size in bytes.
        size_bytes: usize,
        /// Line size in bytes.
        line_bytes: usize,
        /// Associativity.
        ways: usize,
    },

    /// The JSON document could not be deserialized.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A disagreement between entry states and the protected-segment tracker.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The tracked protected count differs from the member list length.
    #[error("protected count {count} does not match {members} tracked members")]
    CountMismatch {
        /// Counter value.
        count: usize,
        /// Member list length.
        members: usize,
    },

    /// More entries are protected than the configured capacity allows.
    #[error("protected segment holds {count} entries but capacity is {capacity}")]
    OverCapacity {
        /// Number of protected entries.
        count: usize,
        /// Configured protected capacity.
        capacity: usize,
    },

    /// An entry is marked protected but is not in the member list.
    #[error("entry {0} is marked protected but is not tracked")]
    MissingMember(EntryId),

    /// An entry is tracked as protected but its state says probation.
    #[error("entry {0} is tracked as protected but is in probation")]
    StrayMember(EntryId),

    /// An entry appears more than once in the member list.
    #[error("entry {0} is tracked more than once")]
    DuplicateMember(EntryId),

    /// The member list references an entry that does not exist.
    #[error("tracked entry {0} does not exist")]
    UnknownEntry(EntryId),
}
