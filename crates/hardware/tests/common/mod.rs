//! Test harness helpers.

/// Configuration builders and trace replay.
pub mod harness;
