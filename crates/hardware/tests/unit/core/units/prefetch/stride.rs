//! Stride Prefetcher Tests.
//!
//! Verifies stride confirmation, degree handling, negative strides and block
//! alignment of observed misses.

use cachesim_core::core::{Prefetcher, StridePrefetcher};

/// 64-byte blocks, two blocks per confirmed stride.
fn prefetcher() -> StridePrefetcher {
    StridePrefetcher::new(6, 2)
}

#[test]
fn test_first_miss_proposes_nothing() {
    let mut pf = prefetcher();
    assert!(pf.observe_miss(0x1000).is_empty());
    assert_eq!(pf.last_block_addr(), 0x1000);
    assert_eq!(pf.pending_stride(), 0x1000);
}

#[test]
fn test_second_equal_delta_confirms_stride() {
    let mut pf = prefetcher();
    assert!(pf.observe_miss(0x1000).is_empty());
    assert!(pf.observe_miss(0x1040).is_empty());
    assert_eq!(pf.observe_miss(0x1080), vec![0x10C0, 0x1100]);
}

#[test]
fn test_stride_keeps_firing_while_stable() {
    let mut pf = prefetcher();
    for addr in [0x1000, 0x1040, 0x1080] {
        let _ = pf.observe_miss(addr);
    }
    assert_eq!(pf.observe_miss(0x10C0), vec![0x1100, 0x1140]);
}

#[test]
fn test_single_stride_change_never_prefetches() {
    let mut pf = prefetcher();
    for addr in [0x1000, 0x1040, 0x1080] {
        let _ = pf.observe_miss(addr);
    }
    // delta 0x100 differs from 0x40
    assert!(pf.observe_miss(0x1180).is_empty());
    assert_eq!(pf.pending_stride(), 0x100);
    // delta back to 0x40, still differs from the recorded 0x100
    assert!(pf.observe_miss(0x11C0).is_empty());
}

#[test]
fn test_negative_stride() {
    let mut pf = prefetcher();
    let _ = pf.observe_miss(0x2000);
    let _ = pf.observe_miss(0x1FC0);
    assert_eq!(pf.observe_miss(0x1F80), vec![0x1F40, 0x1F00]);
    assert_eq!(pf.pending_stride(), -0x40);
}

#[test]
fn test_misses_are_block_aligned() {
    let mut pf = prefetcher();
    let _ = pf.observe_miss(0x1010);
    assert_eq!(pf.last_block_addr(), 0x1000);

    // 0x1010, 0x1075, 0x10AA align to 0x1000, 0x1040, 0x1080.
    let _ = pf.observe_miss(0x1075);
    assert_eq!(pf.observe_miss(0x10AA), vec![0x10C0, 0x1100]);
}

#[test]
fn test_degree_zero_tracks_without_issuing() {
    let mut pf = StridePrefetcher::new(6, 0);
    for addr in [0x0, 0x40, 0x80, 0xC0] {
        assert!(pf.observe_miss(addr).is_empty());
    }
    assert_eq!(pf.pending_stride(), 0x40);
    assert_eq!(pf.last_block_addr(), 0xC0);
}

#[test]
fn test_degree_four() {
    let mut pf = StridePrefetcher::new(5, 4);
    let _ = pf.observe_miss(0x100);
    let _ = pf.observe_miss(0x120);
    assert_eq!(pf.observe_miss(0x140), vec![0x160, 0x180, 0x1A0, 0x1C0]);
}

/// History starts at block 0 with stride 0, so a first miss on block 0 matches it.
#[test]
fn test_first_miss_at_zero_matches_initial_history() {
    let mut pf = prefetcher();
    assert_eq!(pf.observe_miss(0x0), vec![0x0, 0x0]);
}
