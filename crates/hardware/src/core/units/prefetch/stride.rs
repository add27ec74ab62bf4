//! Stride Prefetcher.
//!
//! Tracks the block address of the previous miss and the delta seen on the miss
//! before that. A stride is confirmed when two consecutive misses produce the same
//! delta; only then are the next `degree` blocks along that stride proposed.
//! A single change of stride never triggers a prefetch.
//!
//! # Performance
//!
//! - **Time Complexity:** `observe_miss()` is O(D) where D is the prefetch degree
//! - **Space Complexity:** O(1), one global stream
//! - **Best Case:** Sequential or constant-stride scans that miss in L2
//! - **Worst Case:** Interleaved streams, which keep resetting the stride

use tracing::debug;

use super::Prefetcher;
use crate::common::block_align;

/// Stride Prefetcher state.
#[derive(Debug, Clone)]
pub struct StridePrefetcher {
    /// Block size exponent of the cache being filled.
    block_bits: u32,
    /// Number of blocks proposed per confirmed stride.
    degree: usize,
    /// Block address of the previous miss.
    last_block_addr: u64,
    /// Delta observed on the previous miss.
    pending_stride: i64,
}

impl StridePrefetcher {
    /// Creates a new stride prefetcher with empty history.
    ///
    /// # Arguments
    ///
    /// * `block_bits` - Block size exponent of the cache it fills.
    /// * `degree` - The number of blocks to propose per confirmed stride; zero disables issue
    ///   while still tracking strides.
    pub const fn new(block_bits: u32, degree: usize) -> Self {
        Self {
            block_bits,
            degree,
            last_block_addr: 0,
            pending_stride: 0,
        }
    }

    /// Block address of the most recent miss (0 before any miss).
    pub const fn last_block_addr(&self) -> u64 {
        self.last_block_addr
    }

    /// Delta recorded on the most recent miss (0 before any miss).
    pub const fn pending_stride(&self) -> i64 {
        self.pending_stride
    }
}

impl Prefetcher for StridePrefetcher {
    /// Updates the stride history with a miss and proposes prefetch targets.
    ///
    /// The delta between this miss's block address and the previous one is compared
    /// with the delta recorded last time. When they match, the blocks at
    /// `block + delta`, `block + 2*delta`, ... up to the degree are returned. The new
    /// delta is recorded either way.
    fn observe_miss(&mut self, addr: u64) -> Vec<u64> {
        let block = block_align(addr, self.block_bits);
        let delta = block.wrapping_sub(self.last_block_addr) as i64;
        self.last_block_addr = block;

        let mut prefetches = Vec::new();
        if delta == self.pending_stride {
            debug!(block, delta, "stride confirmed");
            let mut target = block;
            for _ in 0..self.degree {
                target = target.wrapping_add_signed(delta);
                prefetches.push(target);
            }
        }

        self.pending_stride = delta;
        prefetches
    }
}
