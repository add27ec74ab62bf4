//! Set-Associative Cache Level.
//!
//! This module implements one level of the hierarchy. Sets are created the first
//! time an address maps to them and are never removed. Each set replaces blocks in
//! LRU order, driven by a per-level clock that advances once per demand access.
//! Dirty victims are reported to the caller, which decides where the write-back
//! goes (the next level, or main memory). A level may own a prefetcher that is
//! consulted after every demand miss.

/// LRU replacement set and cached block.
pub mod lru;

use std::collections::HashMap;

use tracing::{debug, trace};

use self::lru::{Block, LruSet};
use crate::common::{AccessType, decompose};
use crate::config::CacheGeometry;
use crate::core::units::prefetch::Prefetcher;

/// Result of a demand access to one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was present.
    Hit {
        /// The block had been prefetched and this is its first demand use.
        was_prefetched: bool,
    },
    /// The block was absent and has been filled.
    Miss {
        /// Original address of the dirty block evicted to make room, if any.
        writeback: Option<u64>,
        /// Speculative fills issued by the level's prefetcher.
        prefetch: PrefetchSummary,
    },
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// What the prefetcher did after a miss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrefetchSummary {
    /// Blocks installed speculatively.
    pub issued: u64,
    /// Dirty blocks evicted to make room for them.
    pub writebacks: u64,
}

/// Result of installing one prefetch candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefetchFill {
    /// The block was already cached; nothing changed.
    Present,
    /// The block was installed as the set's least recently used entry.
    Installed {
        /// Original address of the dirty block evicted to make room, if any.
        writeback: Option<u64>,
    },
}

/// One cache level.
#[derive(Debug)]
pub struct CacheLevel {
    geometry: CacheGeometry,
    sets: HashMap<u64, LruSet>,
    clock: i64,
    /// Optional hardware prefetcher, consulted on demand misses.
    prefetcher: Option<Box<dyn Prefetcher>>,
}

impl CacheLevel {
    /// Creates an empty level with the given geometry and no prefetcher.
    pub fn new(geometry: CacheGeometry) -> Self {
        Self {
            geometry,
            sets: HashMap::new(),
            clock: 0,
            prefetcher: None,
        }
    }

    /// Attaches a prefetcher consulted after every demand miss.
    #[must_use]
    pub fn with_prefetcher(mut self, prefetcher: Box<dyn Prefetcher>) -> Self {
        self.prefetcher = Some(prefetcher);
        self
    }

    /// Performs a demand access.
    ///
    /// Advances the level clock. On a hit the block becomes most recently used,
    /// a write sets its dirty bit, and a prefetched mark is cleared. On a miss the
    /// LRU block of a full set is evicted, the new block is installed
    /// (dirty for writes) and the prefetcher, if any, runs on the missed address.
    ///
    /// # Arguments
    ///
    /// * `kind` - Read or write.
    /// * `addr` - The address being accessed.
    pub fn access(&mut self, kind: AccessType, addr: u64) -> AccessOutcome {
        let parts = decompose(addr, &self.geometry);
        self.clock += 1;
        let clock = self.clock;

        if let Some(set) = self.sets.get_mut(&parts.index) {
            if set.touch(parts.tag, clock) {
                let mut was_prefetched = false;
                if let Some(block) = set.lookup_mut(parts.tag) {
                    if kind.is_write() {
                        block.dirty = true;
                    }
                    was_prefetched = std::mem::take(&mut block.prefetched);
                }
                trace!(addr, tag = parts.tag, index = parts.index, "hit");
                return AccessOutcome::Hit { was_prefetched };
            }
        }

        trace!(addr, tag = parts.tag, index = parts.index, "miss");
        let capacity = self.geometry.associativity();
        let set = self
            .sets
            .entry(parts.index)
            .or_insert_with(|| LruSet::new(capacity));
        let writeback = evict_for_fill(set);
        set.insert(Block::new(parts.tag, addr, kind.is_write(), false), clock);

        let prefetch = self.run_prefetcher(addr);
        AccessOutcome::Miss {
            writeback,
            prefetch,
        }
    }

    /// Installs a speculative block for `addr` unless it is already cached.
    ///
    /// The block is clean, marked prefetched, and stamped older than every block in
    /// its set so it is the first to go if it is never used. The level clock does not
    /// advance.
    pub fn install_prefetch(&mut self, addr: u64) -> PrefetchFill {
        let parts = decompose(addr, &self.geometry);
        let capacity = self.geometry.associativity();
        let set = self
            .sets
            .entry(parts.index)
            .or_insert_with(|| LruSet::new(capacity));
        if set.contains(parts.tag) {
            return PrefetchFill::Present;
        }

        let writeback = evict_for_fill(set);
        set.insert_least_recent(Block::new(parts.tag, addr, false, true), self.clock);
        PrefetchFill::Installed { writeback }
    }

    /// Asks the prefetcher for candidates after a miss on `addr` and installs them.
    fn run_prefetcher(&mut self, addr: u64) -> PrefetchSummary {
        let Some(prefetcher) = self.prefetcher.as_mut() else {
            return PrefetchSummary::default();
        };
        let candidates = prefetcher.observe_miss(addr);

        let mut summary = PrefetchSummary::default();
        for candidate in candidates {
            match self.install_prefetch(candidate) {
                PrefetchFill::Present => {}
                PrefetchFill::Installed { writeback } => {
                    debug!(addr = candidate, "prefetched block");
                    summary.issued += 1;
                    if writeback.is_some() {
                        summary.writebacks += 1;
                    }
                }
            }
        }
        summary
    }

    /// Returns `true` if the block holding `addr` is cached.
    pub fn contains(&self, addr: u64) -> bool {
        self.block(addr).is_some()
    }

    /// Returns the cached block holding `addr`.
    pub fn block(&self, addr: u64) -> Option<&Block> {
        let parts = decompose(addr, &self.geometry);
        self.sets.get(&parts.index)?.lookup(parts.tag)
    }

    /// Returns the set at `index`, if it has been created.
    pub fn set(&self, index: u64) -> Option<&LruSet> {
        self.sets.get(&index)
    }

    /// Number of blocks held by the set at `index` (zero if never touched).
    pub fn set_occupancy(&self, index: u64) -> usize {
        self.sets.get(&index).map_or(0, LruSet::len)
    }

    /// Number of sets created so far.
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Iterates over every created set with its index.
    pub fn sets(&self) -> impl Iterator<Item = (u64, &LruSet)> {
        self.sets.iter().map(|(&index, set)| (index, set))
    }

    /// Current value of the level clock (number of demand accesses so far).
    pub const fn clock(&self) -> i64 {
        self.clock
    }

    /// Geometry this level was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }
}

/// Evicts the LRU block of a full set, returning its address if it was dirty.
fn evict_for_fill(set: &mut LruSet) -> Option<u64> {
    let victim = set.evict_lru_if_full()?;
    if victim.dirty {
        debug!(
            tag = victim.tag,
            addr = victim.original_addr,
            "dirty eviction"
        );
        Some(victim.original_addr)
    } else {
        None
    }
}
