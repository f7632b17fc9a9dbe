//! Clock collaborator tests.

/// How the policy reads the clock, checked with a mock.
pub mod clock;
