//! End-to-end profiler scenarios.
//!
//! Covers the feed -> snapshot -> analyze -> solve pipeline through the
//! public API only.

use std::collections::BTreeMap;

use oximrc::{ClassId, MrcProfiler};

fn allocs(entries: &[(ClassId, usize)]) -> BTreeMap<ClassId, usize> {
    entries.iter().copied().collect()
}

fn feed_decimal(profiler: &MrcProfiler, key: u64, class_id: ClassId) {
    profiler.feed(key.to_string().as_bytes(), class_id);
}

// ============ Empty window ============

#[test]
fn test_empty_window_footprint_is_zero() {
    let profiler = MrcProfiler::new(100).unwrap();
    assert_eq!(profiler.query_footprint(&[1, 10, 100]), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_empty_window_solve_is_zero() {
    let profiler = MrcProfiler::new(100).unwrap();
    let plan = profiler.solve_slab_reallocation(&allocs(&[(0, 10)]), &allocs(&[(0, 3)]));
    assert_eq!(plan.mr_old, 0.0);
    assert_eq!(plan.mr_new, 0.0);
    assert!(plan.optimal_allocation.is_empty());
    assert!(plan.moves.is_empty());
    assert!(plan.access_frequencies.is_empty());
}

#[test]
fn test_empty_window_mrc_is_empty() {
    let profiler = MrcProfiler::new(100).unwrap();
    assert!(profiler.query_mrc(&allocs(&[(0, 4)]), 8).is_empty());
}

// ============ Single class, no reuse ============

#[test]
fn test_distinct_keys_cannot_hit() {
    let profiler = MrcProfiler::new(64).unwrap();
    for key in 1..=8u64 {
        feed_decimal(&profiler, key, 0);
    }

    // fp(w) = w for a pure scan.
    let footprint = profiler.query_footprint(&[1, 4, 8, 100]);
    assert!((footprint[0] - 1.0).abs() < 1e-9);
    assert!((footprint[1] - 4.0).abs() < 1e-9);
    assert!((footprint[2] - 8.0).abs() < 1e-9);
    assert!((footprint[3] - 8.0).abs() < 1e-9); // saturates at n

    let mrc = profiler.query_mrc(&allocs(&[(0, 2)]), 4);
    let curve = &mrc[&0];
    assert_eq!(curve.accesses, 8);
    assert_eq!(curve.points[&0], 1.0);
    assert_eq!(curve.points[&4], 1.0); // no reuse, no hits at any size

    let plan = profiler.solve_slab_reallocation(&allocs(&[(0, 2)]), &allocs(&[(0, 4)]));
    assert!((plan.mr_old - 1.0).abs() < 1e-9);
    assert!((plan.mr_new - 1.0).abs() < 1e-9);
}

// ============ Single class, perfect locality ============

#[test]
fn test_single_hot_key_mrc() {
    let profiler = MrcProfiler::new(128).unwrap();
    for _ in 0..100 {
        feed_decimal(&profiler, 7, 0);
    }

    let mrc = profiler.query_mrc(&allocs(&[(0, 1)]), 3);
    let curve = &mrc[&0];
    assert_eq!(curve.accesses, 100);
    assert_eq!(curve.points[&0], 1.0);
    // One object of capacity: the footprint of the reuse window is exactly
    // 1, which does not strictly fit, so the first slab earns nothing.
    assert_eq!(curve.points[&1], 1.0);
    // From two objects on, 99 of 100 accesses hit.
    assert!((curve.points[&2] - 0.01).abs() < 1e-9);
    assert!((curve.points[&3] - 0.01).abs() < 1e-9);

    // With a wider slab the very first slab already fits the footprint.
    let mrc = profiler.query_mrc(&allocs(&[(0, 512)]), 1);
    assert!((mrc[&0].points[&1] - 0.01).abs() < 1e-9);
}

// ============ Two classes, uneven pressure ============

#[test]
fn test_solver_moves_slabs_to_hot_class() {
    let profiler = MrcProfiler::new(4096).unwrap();
    // Class 0: 1000 accesses cycling over 10 keys; class 1: 10 one-shot
    // keys.
    for i in 0..1000u64 {
        feed_decimal(&profiler, i % 10, 0);
    }
    for key in 100..110u64 {
        feed_decimal(&profiler, key, 1);
    }

    let plan = profiler.solve_slab_reallocation(
        &allocs(&[(0, 5), (1, 5)]),
        &allocs(&[(0, 1), (1, 10)]),
    );

    assert!(plan.mr_new < plan.mr_old);
    let total: usize = plan.optimal_allocation.values().sum();
    assert_eq!(total, 11);
    assert!(plan.optimal_allocation[&0] > 1);
    assert!(!plan.moves.is_empty());
    assert!(plan.moves.iter().all(|&pair| pair == (1, 0)));
    assert_eq!(plan.access_frequencies[&0], 1000);
    assert_eq!(plan.access_frequencies[&1], 10);
}

// ============ Reset ============

#[test]
fn test_reset_returns_to_empty_behavior() {
    let profiler = MrcProfiler::new(32).unwrap();
    for key in 0..20u64 {
        feed_decimal(&profiler, key, 0);
    }
    assert_eq!(profiler.len(), 20);

    profiler.reset();
    assert!(profiler.is_empty());
    assert_eq!(profiler.query_footprint(&[1, 10]), vec![0.0, 0.0]);
    assert!(profiler.query_mrc(&allocs(&[(0, 4)]), 4).is_empty());

    // The window is immediately usable again.
    feed_decimal(&profiler, 1, 0);
    assert_eq!(profiler.len(), 1);
}

// ============ Round-trips ============

#[test]
fn test_repeat_solve_is_identical() {
    let profiler = MrcProfiler::new(1024).unwrap();
    for i in 0..500u64 {
        feed_decimal(&profiler, i % 23, (i % 3) as ClassId);
    }

    let allocs_per_slab = allocs(&[(0, 4), (1, 4), (2, 4)]);
    let current = allocs(&[(0, 2), (1, 3), (2, 1)]);
    let first = profiler.solve_slab_reallocation(&allocs_per_slab, &current);
    let second = profiler.solve_slab_reallocation(&allocs_per_slab, &current);
    assert_eq!(first, second);
}

#[test]
fn test_overfeeding_saturates_at_capacity() {
    let capacity = 64;
    let twice = MrcProfiler::new(capacity).unwrap();
    for _ in 0..2 * capacity {
        feed_decimal(&twice, 9, 0);
    }
    let once = MrcProfiler::new(capacity).unwrap();
    for _ in 0..capacity {
        feed_decimal(&once, 9, 0);
    }

    let allocs_per_slab = allocs(&[(0, 1)]);
    assert_eq!(
        twice.query_mrc(&allocs_per_slab, 4),
        once.query_mrc(&allocs_per_slab, 4)
    );
    assert_eq!(twice.len(), once.len());
}

// ============ Query-surface edge cases ============

#[test]
fn test_zero_allocs_per_slab_class_is_skipped() {
    let profiler = MrcProfiler::new(16).unwrap();
    feed_decimal(&profiler, 1, 0);
    feed_decimal(&profiler, 2, 1);

    let mrc = profiler.query_mrc(&allocs(&[(0, 0), (1, 4)]), 2);
    assert!(!mrc.contains_key(&0));
    assert!(mrc.contains_key(&1));
}

#[test]
fn test_unseen_class_yields_no_entry() {
    let profiler = MrcProfiler::new(16).unwrap();
    feed_decimal(&profiler, 1, 0);

    let mrc = profiler.query_mrc(&allocs(&[(0, 4), (5, 4)]), 2);
    assert!(mrc.contains_key(&0));
    assert!(!mrc.contains_key(&5));
}

#[test]
fn test_text_keys_are_distinct_identities() {
    let profiler = MrcProfiler::new(16).unwrap();
    profiler.feed(b"alpha", 0);
    profiler.feed(b"beta", 0);
    profiler.feed(b"alpha", 0);

    let mrc = profiler.query_mrc(&allocs(&[(0, 8)]), 1);
    let curve = &mrc[&0];
    assert_eq!(curve.accesses, 3);
    // One reuse of "alpha" at distance 2, footprint 2 < 8: it hits.
    assert!((curve.points[&1] - (1.0 - 1.0 / 3.0)).abs() < 1e-9);
}
