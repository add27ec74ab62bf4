//! Memory hierarchy units.

/// Set-associative cache levels with LRU replacement.
pub mod cache;

/// Hardware prefetchers.
pub mod prefetch;
