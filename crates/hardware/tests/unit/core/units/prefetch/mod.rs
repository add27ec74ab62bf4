//! Prefetcher tests.

/// Stride confirmation and candidate generation.
pub mod stride;
