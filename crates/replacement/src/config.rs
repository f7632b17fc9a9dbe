//! Configuration for the replacement policy and its owning cache.
//!
//! This module defines all parameters used to build a policy. It provides:
//! 1. **Defaults:** Baseline segment sizes and cache geometry.
//! 2. **Structures:** [`SlruConfig`] for the policy and [`CacheConfig`] for the
//!    set-associative tag store that drives it.
//! 3. **Enums:** The victim-selection variant used when a set has no
//!    probationary candidate.
//!
//! Configuration is normally deserialized from JSON by the surrounding
//! simulation tooling, or built with `Default` and struct update syntax.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Default capacity of the protected segment (entries).
    pub const PROTECTED_SIZE: usize = 8;

    /// Default nominal size of the probationary segment (entries).
    ///
    /// Advisory only: membership in probation is implicit and not bounded.
    pub const PROBATION_SIZE: usize = 8;

    /// Default cache size in bytes (1 KiB).
    pub const CACHE_SIZE: usize = 1024;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Default associativity.
    pub const CACHE_WAYS: usize = 4;
}

/// Behaviour of victim selection when every candidate in a set is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictimSelection {
    /// Fall back to the least recently used protected candidate and demote it
    /// before handing it out as the victim.
    #[default]
    #[serde(alias = "DemoteProtected", alias = "fallback")]
    DemoteProtected,
    /// Require at least one probationary candidate. A fully protected set is a
    /// caller contract violation and panics.
    #[serde(alias = "Strict")]
    Strict,
}

/// Segmented-LRU policy parameters.
///
/// # Examples
///
/// ```
/// use slru_core::config::{SlruConfig, VictimSelection};
///
/// let config = SlruConfig::from_json(r#"{ "protected_size": 2, "probation_size": 6 }"#).unwrap();
/// assert_eq!(config.protected_size, 2);
/// assert_eq!(config.probation_size, 6);
/// assert_eq!(config.victim_selection, VictimSelection::DemoteProtected);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SlruConfig {
    /// Maximum number of entries in the protected segment. Enforced.
    #[serde(default = "SlruConfig::default_protected_size")]
    pub protected_size: usize,

    /// Nominal size of the probationary segment. Advisory sizing metadata.
    #[serde(default = "SlruConfig::default_probation_size")]
    pub probation_size: usize,

    /// Fallback behaviour for fully protected candidate sets.
    #[serde(default)]
    pub victim_selection: VictimSelection,
}

impl SlruConfig {
    /// Creates a configuration with the given segment sizes and the default
    /// victim-selection behaviour.
    pub const fn new(protected_size: usize, probation_size: usize) -> Self {
        Self {
            protected_size,
            probation_size,
            victim_selection: VictimSelection::DemoteProtected,
        }
    }

    /// Returns a copy with `victim_selection` replaced.
    #[must_use]
    pub const fn with_victim_selection(mut self, victim_selection: VictimSelection) -> Self {
        self.victim_selection = victim_selection;
        self
    }

    /// Checks that both segment sizes are positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroProtectedSize`] or
    /// [`ConfigError::ZeroProbationSize`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.protected_size == 0 {
            return Err(ConfigError::ZeroProtectedSize);
        }
        if self.probation_size == 0 {
            return Err(ConfigError::ZeroProbationSize);
        }
        Ok(())
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the
    /// [`validate`](Self::validate) errors for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_json`](Self::from_json).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    fn default_protected_size() -> usize {
        defaults::PROTECTED_SIZE
    }

    fn default_probation_size() -> usize {
        defaults::PROBATION_SIZE
    }
}

impl Default for SlruConfig {
    fn default() -> Self {
        Self::new(defaults::PROTECTED_SIZE, defaults::PROBATION_SIZE)
    }
}

/// Set-associative cache geometry plus the policy that manages it.
///
/// # Examples
///
/// ```
/// use slru_core::config::CacheConfig;
///
/// let json = r#"{
///     "size_bytes": 512,
///     "line_bytes": 64,
///     "ways": 2,
///     "slru": { "protected_size": 3, "probation_size": 5, "victim_selection": "strict" }
/// }"#;
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.sets().unwrap(), 4);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes.
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes. Must be a power of two.
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy parameters.
    #[serde(default)]
    pub slru: SlruConfig,
}

impl CacheConfig {
    /// Returns the number of sets implied by the geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGeometry`] when the line size is not a
    /// power of two, `line_bytes * ways` overflows, or the size does not
    /// divide evenly into sets of `ways` lines.
    pub const fn sets(&self) -> Result<usize, ConfigError> {
        if self.ways == 0 {
            return Err(self.geometry_error("associativity must be non-zero"));
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(self.geometry_error("line size must be a power of two"));
        }
        let Some(set_bytes) = self.line_bytes.checked_mul(self.ways) else {
            return Err(self.geometry_error("line_bytes * ways overflows"));
        };
        if self.size_bytes == 0 || self.size_bytes % set_bytes != 0 {
            return Err(self.geometry_error("size must be a positive multiple of line_bytes * ways"));
        }
        Ok(self.size_bytes / set_bytes)
    }

    /// Checks geometry and policy parameters.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`sets`](Self::sets) or
    /// [`SlruConfig::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = self.sets()?;
        self.slru.validate()
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the
    /// [`validate`](Self::validate) errors for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    const fn geometry_error(&self, reason: &'static str) -> ConfigError {
        ConfigError::InvalidGeometry {
            reason,
            size_bytes: self.size_bytes,
            line_bytes: self.line_bytes,
            ways: self.ways,
        }
    }

    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }
}

impl Default for CacheConfig {
    /// A 1 KiB, 4-way cache with 64-byte lines and default policy sizes.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            slru: SlruConfig::default(),
        }
    }
}
