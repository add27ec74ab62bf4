//! Cache hierarchy components.
//!
//! The orchestrator in [`crate::sim`] wires these together; each unit here only
//! knows about its own state.

/// Cache levels and prefetchers.
pub mod units;

pub use units::cache::{AccessOutcome, CacheLevel, PrefetchFill, PrefetchSummary};
pub use units::prefetch::{Prefetcher, StridePrefetcher};
