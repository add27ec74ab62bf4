//! Simulator: owns both cache levels for one run.
//!
//! Every CPU access enters at L1. An L1 miss fetches the block from L2 with a read
//! (the data is needed whatever the CPU intends to do with it), after which a dirty
//! L1 victim is written to L2. L2 misses feed the stride prefetcher, and dirty L2
//! victims count as write-backs to main memory. All state lives in the `Simulator`,
//! so independent runs can proceed side by side.

use tracing::debug;

use crate::common::{AccessType, ConfigError};
use crate::config::HierarchyConfig;
use crate::core::{AccessOutcome, CacheLevel, StridePrefetcher};
use crate::sim::trace::TraceEvent;
use crate::stats::CacheStats;

/// Two-level cache hierarchy driven one access at a time.
#[derive(Debug)]
pub struct Simulator {
    config: HierarchyConfig,
    l1: CacheLevel,
    l2: CacheLevel,
}

impl Simulator {
    /// Creates a simulator with empty caches and fresh prefetch history.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`HierarchyConfig::validate`] when the
    /// configuration cannot describe the hierarchy.
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        debug!(
            l1_sets = config.l1.num_sets(),
            l1_ways = config.l1.associativity(),
            l1_block = config.l1.block_bytes(),
            l2_sets = config.l2.num_sets(),
            l2_ways = config.l2.associativity(),
            l2_block = config.l2.block_bytes(),
            k = config.prefetch_degree,
            "building cache hierarchy"
        );

        let prefetcher = StridePrefetcher::new(config.l2.b, config.prefetch_degree as usize);
        Ok(Self {
            config: *config,
            l1: CacheLevel::new(config.l1),
            l2: CacheLevel::new(config.l2).with_prefetcher(Box::new(prefetcher)),
        })
    }

    /// Simulates one CPU access.
    ///
    /// # Arguments
    ///
    /// * `kind` - Read or write.
    /// * `addr` - The address accessed.
    /// * `stats` - Counters for this run.
    pub fn access(&mut self, kind: AccessType, addr: u64, stats: &mut CacheStats) {
        stats.l1_accesses += 1;
        match kind {
            AccessType::Read => stats.reads += 1,
            AccessType::Write => stats.writes += 1,
        }

        let AccessOutcome::Miss { writeback, .. } = self.l1.access(kind, addr) else {
            return;
        };
        match kind {
            AccessType::Read => stats.l1_read_misses += 1,
            AccessType::Write => stats.l1_write_misses += 1,
        }

        self.l2_access(AccessType::Read, addr, stats);
        if let Some(victim) = writeback {
            debug!(addr = victim, "L1 write-back to L2");
            self.l2_access(AccessType::Write, victim, stats);
        }
    }

    /// Simulates one access arriving at L2, from an L1 fill or an L1 write-back.
    fn l2_access(&mut self, kind: AccessType, addr: u64, stats: &mut CacheStats) {
        match self.l2.access(kind, addr) {
            AccessOutcome::Hit { was_prefetched } => {
                if was_prefetched {
                    stats.successful_prefetches += 1;
                }
            }
            AccessOutcome::Miss {
                writeback,
                prefetch,
            } => {
                match kind {
                    AccessType::Read => stats.l2_read_misses += 1,
                    AccessType::Write => stats.l2_write_misses += 1,
                }
                if writeback.is_some() {
                    stats.write_backs += 1;
                }
                stats.prefetched_blocks += prefetch.issued;
                stats.write_backs += prefetch.writebacks;
            }
        }
    }

    /// Simulates every event of a trace in order.
    pub fn run<I>(&mut self, events: I, stats: &mut CacheStats)
    where
        I: IntoIterator<Item = TraceEvent>,
    {
        for event in events {
            self.access(event.kind, event.addr, stats);
        }
    }

    /// Computes the average access time for this run's configuration.
    pub fn finalize(&self, stats: &mut CacheStats) {
        stats.finalize(&self.config);
    }

    /// Configuration this simulator was built with.
    pub const fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// The first-level cache.
    pub const fn l1(&self) -> &CacheLevel {
        &self.l1
    }

    /// The second-level cache.
    pub const fn l2(&self) -> &CacheLevel {
        &self.l2
    }
}
