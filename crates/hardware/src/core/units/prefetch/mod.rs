//! Hardware Prefetcher implementations.
//!
//! This module contains the interface a cache level uses to ask for speculative
//! fills, and the stride prefetcher that feeds L2.

/// Stride prefetcher (detects a repeated block-address delta between misses).
pub mod stride;

pub use self::stride::StridePrefetcher;

use std::fmt;

/// Trait for cache prefetcher implementations.
///
/// A prefetcher watches the misses of the level that owns it and proposes
/// addresses to install. The level skips candidates that are already cached.
pub trait Prefetcher: fmt::Debug + Send + Sync {
    /// Observes a demand miss and returns addresses to prefetch, in issue order.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address that missed.
    ///
    /// # Returns
    ///
    /// Candidate addresses. Empty if nothing should be prefetched.
    fn observe_miss(&mut self, addr: u64) -> Vec<u64>;
}
