//! Common utilities and types shared by every part of the simulator.
//!
//! This module provides:
//! 1. **Address Decomposition:** Mapping an address onto a level's tag and set index.
//! 2. **Access Kinds:** The read/write direction of a trace event.
//! 3. **Error Handling:** Configuration and trace input errors.

/// Address decomposition (tag, set index, block alignment).
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration and trace input.
pub mod error;

pub use addr::{Decomposed, block_align, decompose};
pub use data::AccessType;
pub use error::{ConfigError, TraceError};
