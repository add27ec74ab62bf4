//! Two-level cache hierarchy simulator library.
//!
//! This crate implements a trace-driven model of an L1/L2 set-associative cache hierarchy:
//! 1. **Addressing:** Decomposition of physical addresses into tag and set index.
//! 2. **Caches:** Per-set LRU replacement, write-back with dirty tracking, lazily created sets.
//! 3. **Prefetching:** A stride prefetcher that speculatively fills L2 on L2 misses.
//! 4. **Simulation:** The orchestrator that drives one access through L1 and L2, trace parsing.
//! 5. **Statistics:** Hit/miss counters and the derived average access time.

/// Common types (address decomposition, access kinds, errors).
pub mod common;
/// Hierarchy configuration (geometry exponents, defaults, validation).
pub mod config;
/// Cache levels and prefetchers.
pub mod core;
/// Simulation orchestrator and trace input.
pub mod sim;
/// Statistics collection, finalization, and reporting.
pub mod stats;

/// Root configuration type; use `HierarchyConfig::default()` or deserialize from JSON.
pub use crate::config::HierarchyConfig;
/// Simulation orchestrator; owns both cache levels for one run.
pub use crate::sim::Simulator;
/// Accumulated statistics for one run.
pub use crate::stats::CacheStats;
