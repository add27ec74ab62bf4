//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters of one run and derives the summary figures:
//! 1. **Traffic:** CPU reads and writes, L1 accesses.
//! 2. **Misses:** Read and write misses at L1 and L2.
//! 3. **Write-backs:** Dirty L2 evictions to main memory.
//! 4. **Prefetching:** Blocks prefetched into L2 and how many were later used.
//! 5. **Average access time:** Computed by [`CacheStats::finalize`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{CacheGeometry, HierarchyConfig};

/// Base L1 hit time, in cycles.
const L1_HIT_BASE: f64 = 2.0;
/// Additional L1 hit time per associativity exponent step.
const L1_HIT_PER_WAY_BIT: f64 = 0.2;
/// Base L2 hit time, in cycles.
const L2_HIT_BASE: f64 = 4.0;
/// Additional L2 hit time per associativity exponent step.
const L2_HIT_PER_WAY_BIT: f64 = 0.4;
/// Main memory access penalty, in cycles.
const MEMORY_PENALTY: f64 = 500.0;

/// Counters for one simulation run.
///
/// Created empty by the caller, mutated only by the simulator, and finalized once
/// the trace is exhausted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Reads issued by the CPU.
    pub reads: u64,
    /// Writes issued by the CPU.
    pub writes: u64,
    /// Accesses reaching L1 (every CPU access).
    pub l1_accesses: u64,
    /// L1 misses caused by reads.
    pub l1_read_misses: u64,
    /// L1 misses caused by writes.
    pub l1_write_misses: u64,
    /// L2 misses caused by reads (L1 fills).
    pub l2_read_misses: u64,
    /// L2 misses caused by writes (L1 write-backs).
    pub l2_write_misses: u64,
    /// Dirty blocks written from L2 to main memory.
    pub write_backs: u64,
    /// Blocks installed in L2 by the prefetcher.
    pub prefetched_blocks: u64,
    /// Prefetched blocks later hit by a demand access.
    pub successful_prefetches: u64,
    /// Average access time in cycles; zero until [`CacheStats::finalize`] runs.
    pub avg_access_time: f64,
}

#[allow(clippy::suboptimal_flops)]
impl CacheStats {
    /// Total L1 misses.
    pub const fn l1_misses(&self) -> u64 {
        self.l1_read_misses + self.l1_write_misses
    }

    /// L1 miss rate: L1 misses over L1 accesses. Zero when there were no accesses.
    pub fn l1_miss_rate(&self) -> f64 {
        ratio(self.l1_misses(), self.l1_accesses)
    }

    /// L2 miss rate as used for the average access time: L2 read misses over L1
    /// misses. L2 write misses are deliberately not counted. Zero when L1 never missed.
    pub fn l2_miss_rate(&self) -> f64 {
        ratio(self.l2_read_misses, self.l1_misses())
    }

    /// L1 hit time in cycles, `2 + 0.2 * S1`.
    pub fn l1_hit_time(l1: &CacheGeometry) -> f64 {
        L1_HIT_BASE + L1_HIT_PER_WAY_BIT * f64::from(l1.s)
    }

    /// L2 hit time in cycles, `4 + 0.4 * S2`.
    pub fn l2_hit_time(l2: &CacheGeometry) -> f64 {
        L2_HIT_BASE + L2_HIT_PER_WAY_BIT * f64::from(l2.s)
    }

    /// Computes [`CacheStats::avg_access_time`] from the counters.
    ///
    /// `AAT = HT1 + MR1 * (HT2 + MR2 * 500)`. Ratios with a zero denominator are
    /// taken as zero, so an empty run reports the L1 hit time.
    pub fn finalize(&mut self, config: &HierarchyConfig) {
        let ht1 = Self::l1_hit_time(&config.l1);
        let ht2 = Self::l2_hit_time(&config.l2);
        let mr1 = self.l1_miss_rate();
        let mr2 = self.l2_miss_rate();
        self.avg_access_time = ht1 + mr1 * (ht2 + mr2 * MEMORY_PENALTY);
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

/// `num / den`, or zero when `den` is zero.
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for CacheStats {
    /// Writes the "Cache Statistics" block of the run report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache Statistics")?;
        writeln!(f, "L1 Accesses: {}", self.l1_accesses)?;
        writeln!(f, "Reads Issued by CPU: {}", self.reads)?;
        writeln!(f, "L1 Read misses: {}", self.l1_read_misses)?;
        writeln!(f, "L2 Read misses: {}", self.l2_read_misses)?;
        writeln!(f, "Writes Issued by CPU: {}", self.writes)?;
        writeln!(f, "L1 Write misses: {}", self.l1_write_misses)?;
        writeln!(f, "L2 Write misses: {}", self.l2_write_misses)?;
        writeln!(f, "Write backs to Main Memory: {}", self.write_backs)?;
        writeln!(f, "Prefetched blocks: {}", self.prefetched_blocks)?;
        writeln!(f, "Successful prefetches: {}", self.successful_prefetches)?;
        writeln!(f, "Average access time (AAT): {:.6}", self.avg_access_time)
    }
}
