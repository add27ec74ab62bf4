//! Configuration builders and trace replay.

use cachesim_core::config::{CacheGeometry, HierarchyConfig};
use cachesim_core::sim::TraceEvent;
use cachesim_core::{CacheStats, Simulator};

/// Builds a hierarchy from `(C, B, S)` tuples and a prefetch degree.
pub fn hierarchy(l1: (u32, u32, u32), l2: (u32, u32, u32), k: u32) -> HierarchyConfig {
    HierarchyConfig {
        l1: CacheGeometry::new(l1.0, l1.1, l1.2),
        l2: CacheGeometry::new(l2.0, l2.1, l2.2),
        prefetch_degree: k,
    }
}

/// Single-block L1 and single-block L2 with no prefetching.
///
/// L1 holds one 32-byte block, L2 one 64-byte block, so every new block evicts
/// the previous one and write-back traffic is easy to follow.
pub fn one_block_each() -> HierarchyConfig {
    hierarchy((5, 5, 0), (6, 6, 0), 0)
}

/// Replays `events` through a fresh simulator and returns it with its statistics.
pub fn replay(config: &HierarchyConfig, events: &[TraceEvent]) -> (Simulator, CacheStats) {
    let mut sim = Simulator::new(config).expect("test configuration must be valid");
    let mut stats = CacheStats::default();
    sim.run(events.iter().copied(), &mut stats);
    (sim, stats)
}
