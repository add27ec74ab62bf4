//! # Statistics Verification
//!
//! Average access time arithmetic, the text report, and the JSON shape.

use cachesim_core::{CacheStats, HierarchyConfig};
use pretty_assertions::assert_eq;

use crate::common::harness::hierarchy;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// 100 accesses, 10 L1 misses, 5 L2 read misses and 3 L2 write misses.
fn sample() -> CacheStats {
    CacheStats {
        reads: 70,
        writes: 30,
        l1_accesses: 100,
        l1_read_misses: 6,
        l1_write_misses: 4,
        l2_read_misses: 5,
        l2_write_misses: 3,
        write_backs: 2,
        prefetched_blocks: 12,
        successful_prefetches: 7,
        ..CacheStats::default()
    }
}

#[test]
fn test_new_stats_are_zero() {
    let stats = CacheStats::default();
    assert_eq!(stats.l1_accesses, 0);
    assert_eq!(stats.l1_misses(), 0);
    assert_eq!(stats.write_backs, 0);
    assert_eq!(stats.prefetched_blocks, 0);
    assert!(close(stats.avg_access_time, 0.0));
}

#[test]
fn test_hit_times_follow_associativity() {
    let config = HierarchyConfig::default();
    assert!(close(CacheStats::l1_hit_time(&config.l1), 2.6));
    assert!(close(CacheStats::l2_hit_time(&config.l2), 6.0));
}

#[test]
fn test_miss_rates() {
    let stats = sample();
    assert!(close(stats.l1_miss_rate(), 0.1));
    assert!(close(stats.l2_miss_rate(), 0.5));
}

/// HT1 = 2.6, HT2 = 6.0, MR1 = 0.1, MR2 = 0.5 → 2.6 + 0.1 * (6 + 250) = 28.2.
#[test]
fn test_average_access_time() {
    let mut stats = sample();
    stats.finalize(&HierarchyConfig::default());
    assert!(
        close(stats.avg_access_time, 28.2),
        "AAT was {}",
        stats.avg_access_time
    );
}

#[test]
fn test_l2_write_misses_do_not_affect_aat() {
    let config = HierarchyConfig::default();
    let mut a = sample();
    let mut b = CacheStats {
        l2_write_misses: 1000,
        ..sample()
    };
    a.finalize(&config);
    b.finalize(&config);
    assert!(close(a.avg_access_time, b.avg_access_time));
}

#[test]
fn test_empty_run_reports_l1_hit_time() {
    let mut stats = CacheStats::default();
    stats.finalize(&HierarchyConfig::default());
    assert!(close(stats.avg_access_time, 2.6));
}

#[test]
fn test_no_l1_misses_reports_l1_hit_time() {
    let mut stats = CacheStats {
        reads: 10,
        l1_accesses: 10,
        ..CacheStats::default()
    };
    stats.finalize(&hierarchy((10, 5, 0), (12, 6, 2), 0));
    assert!(close(stats.avg_access_time, 2.0));
}

#[test]
fn test_report_text() {
    let mut stats = sample();
    stats.finalize(&HierarchyConfig::default());
    let expected = "\
Cache Statistics
L1 Accesses: 100
Reads Issued by CPU: 70
L1 Read misses: 6
L2 Read misses: 5
Writes Issued by CPU: 30
L1 Write misses: 4
L2 Write misses: 3
Write backs to Main Memory: 2
Prefetched blocks: 12
Successful prefetches: 7
Average access time (AAT): 28.200000
";
    assert_eq!(stats.to_string(), expected);
}

#[test]
fn test_json_field_names() {
    let value = serde_json::to_value(sample()).unwrap();
    for key in [
        "reads",
        "writes",
        "l1_accesses",
        "l1_read_misses",
        "l1_write_misses",
        "l2_read_misses",
        "l2_write_misses",
        "write_backs",
        "prefetched_blocks",
        "successful_prefetches",
        "avg_access_time",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["l1_accesses"], 100);
}
