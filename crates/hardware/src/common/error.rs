//! Error definitions.
//!
//! The simulation loop itself has no failure modes: a miss is an ordinary outcome.
//! Errors only arise while setting a run up:
//! 1. **Configuration:** Geometry that cannot describe a cache, or an L2 smaller than L1.
//! 2. **Trace Input:** Lines that are not `<r|w> <hex address>`, or I/O failures.

use thiserror::Error;

/// Rejected hierarchy configuration.
///
/// Returned by [`HierarchyConfig::validate`](crate::config::HierarchyConfig::validate)
/// and therefore by [`Simulator::new`](crate::sim::Simulator::new); a simulator is
/// never constructed from an invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The level's total size is smaller than one set of blocks (`C < B + S`).
    #[error("{level} geometry invalid: C={c} is smaller than B+S={b}+{s}")]
    InvalidGeometry {
        /// `"L1"` or `"L2"`.
        level: &'static str,
        /// Total-size exponent.
        c: u32,
        /// Block-size exponent.
        b: u32,
        /// Associativity exponent.
        s: u32,
    },

    /// An exponent too large to describe a cache over 64-bit addresses.
    #[error("{level} size exponent C={c} must be below 64")]
    ExponentTooLarge {
        /// `"L1"` or `"L2"`.
        level: &'static str,
        /// Total-size exponent.
        c: u32,
    },

    /// An L2 parameter is smaller than the matching L1 parameter.
    #[error("{field}2={l2} must be at least {field}1={l1}")]
    L2SmallerThanL1 {
        /// `"C"`, `"B"` or `"S"`.
        field: &'static str,
        /// The L1 exponent.
        l1: u32,
        /// The L2 exponent.
        l2: u32,
    },

    /// Prefetch degree outside `0..=4`.
    #[error("prefetch degree K={0} must be between 0 and 4")]
    PrefetchDegree(u32),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for a [`HierarchyConfig`](crate::config::HierarchyConfig).
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// A trace line that could not be turned into an access.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The line has an access tag but no address.
    #[error("line {line}: missing address")]
    MissingField {
        /// 1-based line number.
        line: usize,
    },

    /// The access tag is not `r` or `w`.
    #[error("line {line}: unknown access type {found:?}")]
    UnknownAccess {
        /// 1-based line number.
        line: usize,
        /// The offending tag.
        found: String,
    },

    /// The address is not a hexadecimal 64-bit value.
    #[error("line {line}: bad address {text:?}")]
    BadAddress {
        /// 1-based line number.
        line: usize,
        /// The offending address text.
        text: String,
    },

    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}
