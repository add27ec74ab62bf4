//! Memory Access Types.
//!
//! This module defines the direction of a memory access. It is used for:
//! 1. **Dirty Tracking:** Writes mark the touched block dirty.
//! 2. **Statistics Tracking:** Reads and writes are counted and missed separately.
//! 3. **Trace Input:** Each trace line starts with `r` or `w`.

use serde::{Deserialize, Serialize};

/// Direction of a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Data read (load).
    Read,
    /// Data write (store). Leaves the accessed block dirty.
    Write,
}

impl AccessType {
    /// Parses the single-character trace tag (`r`/`R` or `w`/`W`).
    pub fn from_trace_char(c: char) -> Option<Self> {
        match c {
            'r' | 'R' => Some(Self::Read),
            'w' | 'W' => Some(Self::Write),
            _ => None,
        }
    }

    /// Returns the lowercase trace character for this access.
    pub const fn as_trace_char(self) -> char {
        match self {
            Self::Read => 'r',
            Self::Write => 'w',
        }
    }

    /// Returns `true` for [`AccessType::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
