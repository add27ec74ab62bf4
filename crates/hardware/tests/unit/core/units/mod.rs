//! Memory hierarchy unit tests.

/// Cache level and LRU set tests.
pub mod cache;

/// Prefetcher tests.
pub mod prefetch;
