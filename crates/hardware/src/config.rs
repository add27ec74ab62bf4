//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines the parameters of one simulation run. It provides:
//! 1. **Defaults:** The baseline hierarchy (4 KiB 8-way L1, 32 KiB 32-way L2, K=2).
//! 2. **Structures:** Per-level geometry exponents and the two-level hierarchy.
//! 3. **Validation:** Rejection of geometries that cannot describe a cache.
//!
//! Configuration is built from `HierarchyConfig::default()`, from JSON, or by the CLI
//! from individual flags. Every size is given as a power-of-two exponent.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// L1 total size exponent (4 KiB).
    pub const C1: u32 = 12;

    /// L1 block size exponent (32-byte blocks).
    pub const B1: u32 = 5;

    /// L1 associativity exponent (8 blocks per set).
    pub const S1: u32 = 3;

    /// L2 total size exponent (32 KiB).
    pub const C2: u32 = 15;

    /// L2 block size exponent (64-byte blocks).
    pub const B2: u32 = 6;

    /// L2 associativity exponent (32 blocks per set).
    pub const S2: u32 = 5;

    /// Blocks prefetched into L2 once a stride is confirmed.
    pub const PREFETCH_DEGREE: u32 = 2;

    /// Largest accepted prefetch degree.
    pub const MAX_PREFETCH_DEGREE: u32 = 4;
}

/// Geometry of one cache level, expressed as power-of-two exponents.
///
/// The level holds `2^C` bytes in blocks of `2^B` bytes, grouped into sets of
/// `2^S` blocks, giving `2^(C-B-S)` sets. When `C - B == S` the level is fully
/// associative and has a single set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheGeometry {
    /// Total size exponent.
    pub c: u32,
    /// Block size exponent.
    pub b: u32,
    /// Associativity exponent.
    pub s: u32,
}

impl CacheGeometry {
    /// Creates a geometry from its three exponents.
    pub const fn new(c: u32, b: u32, s: u32) -> Self {
        Self { c, b, s }
    }

    /// Number of index bits, `C - B - S`.
    ///
    /// Saturates at zero for geometries that fail validation.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.c.saturating_sub(self.b).saturating_sub(self.s)
    }

    /// Returns `true` when the level has exactly one set.
    pub const fn is_fully_associative(&self) -> bool {
        self.c.saturating_sub(self.b) == self.s
    }

    /// Blocks per set, `2^S`.
    pub const fn associativity(&self) -> usize {
        1 << self.s
    }

    /// Number of sets, `2^(C-B-S)`.
    pub const fn num_sets(&self) -> u64 {
        1 << self.index_bits()
    }

    /// Block size in bytes, `2^B`.
    pub const fn block_bytes(&self) -> u64 {
        1 << self.b
    }

    /// Total size in bytes, `2^C`.
    pub const fn size_bytes(&self) -> u64 {
        1 << self.c
    }

    /// Checks that the geometry describes a cache over 64-bit addresses.
    fn validate(&self, level: &'static str) -> Result<(), ConfigError> {
        if self.c >= 64 {
            return Err(ConfigError::ExponentTooLarge { level, c: self.c });
        }
        if self.c < self.b.saturating_add(self.s) {
            return Err(ConfigError::InvalidGeometry {
                level,
                c: self.c,
                b: self.b,
                s: self.s,
            });
        }
        Ok(())
    }
}

/// Root configuration: both cache levels and the prefetch degree.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let config = HierarchyConfig::default();
/// assert_eq!(config.l1.num_sets(), 16);
/// assert_eq!(config.l2.associativity(), 32);
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing from JSON; omitted sections keep their defaults:
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let json = r#"{
///     "l1": { "c": 10, "b": 5, "s": 5 },
///     "prefetch_degree": 0
/// }"#;
///
/// let config = HierarchyConfig::from_json_str(json).unwrap();
/// assert!(config.l1.is_fully_associative());
/// assert_eq!(config.l2.c, 15);
/// assert_eq!(config.prefetch_degree, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// First-level cache.
    #[serde(default = "HierarchyConfig::default_l1")]
    pub l1: CacheGeometry,

    /// Second-level cache.
    #[serde(default = "HierarchyConfig::default_l2")]
    pub l2: CacheGeometry,

    /// Blocks prefetched into L2 per confirmed stride (K, `0..=4`).
    #[serde(default = "HierarchyConfig::default_prefetch_degree")]
    pub prefetch_degree: u32,
}

impl HierarchyConfig {
    /// Returns the default L1 geometry.
    const fn default_l1() -> CacheGeometry {
        CacheGeometry::new(defaults::C1, defaults::B1, defaults::S1)
    }

    /// Returns the default L2 geometry.
    const fn default_l2() -> CacheGeometry {
        CacheGeometry::new(defaults::C2, defaults::B2, defaults::S2)
    }

    /// Returns the default prefetch degree.
    const fn default_prefetch_degree() -> u32 {
        defaults::PREFETCH_DEGREE
    }

    /// Parses a configuration from a JSON string. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Json`] if it does not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks every constraint the simulator relies on.
    ///
    /// Each level must satisfy `C >= B + S` with `C < 64`, L2 must be at least as
    /// large as L1 in every exponent, and `K <= 4`.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.l1.validate("L1")?;
        self.l2.validate("L2")?;

        for (field, l1, l2) in [
            ("C", self.l1.c, self.l2.c),
            ("B", self.l1.b, self.l2.b),
            ("S", self.l1.s, self.l2.s),
        ] {
            if l2 < l1 {
                return Err(ConfigError::L2SmallerThanL1 { field, l1, l2 });
            }
        }

        if self.prefetch_degree > defaults::MAX_PREFETCH_DEGREE {
            return Err(ConfigError::PrefetchDegree(self.prefetch_degree));
        }
        Ok(())
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            l1: Self::default_l1(),
            l2: Self::default_l2(),
            prefetch_degree: defaults::PREFETCH_DEGREE,
        }
    }
}

impl fmt::Display for HierarchyConfig {
    /// Writes the "Cache Settings" block of the run report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache Settings")?;
        writeln!(f, "C1: {}", self.l1.c)?;
        writeln!(f, "B1: {}", self.l1.b)?;
        writeln!(f, "S1: {}", self.l1.s)?;
        writeln!(f, "C2: {}", self.l2.c)?;
        writeln!(f, "B2: {}", self.l2.b)?;
        writeln!(f, "S2: {}", self.l2.s)?;
        writeln!(f, "K: {}", self.prefetch_degree)
    }
}
