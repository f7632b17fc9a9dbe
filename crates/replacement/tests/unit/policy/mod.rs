//! Replacement policy tests.
