//! Solve a slab reallocation and print the move-by-move plan.
//!
//! Run with: `cargo run --example rebalance`

use std::collections::BTreeMap;

use oximrc::{ClassId, MrcProfiler};

fn main() {
    let profiler = MrcProfiler::new(100_000).expect("valid capacity");

    // Class 0 is hot and re-reads a small working set; classes 1 and 2 are
    // scans that never revisit a key.
    for i in 0..20_000u64 {
        profiler.feed((i % 200).to_string().as_bytes(), 0);
    }
    for key in 0..2_000u64 {
        profiler.feed((1_000_000 + key).to_string().as_bytes(), 1);
    }
    for key in 0..500u64 {
        profiler.feed((2_000_000 + key).to_string().as_bytes(), 2);
    }

    let allocs_per_slab: BTreeMap<ClassId, usize> =
        [(0, 100), (1, 100), (2, 100)].into_iter().collect();
    let current: BTreeMap<ClassId, usize> = [(0, 1), (1, 8), (2, 8)].into_iter().collect();

    let plan = profiler.solve_slab_reallocation(&allocs_per_slab, &current);

    println!("miss rate: {:.4} -> {:.4}", plan.mr_old, plan.mr_new);
    println!("\nallocation (slabs):");
    for (class_id, &slabs) in &plan.optimal_allocation {
        let before = current.get(class_id).copied().unwrap_or(0);
        println!("  class {class_id}: {before} -> {slabs}");
    }

    println!("\nplan ({} moves):", plan.moves.len());
    for (step, (victim, receiver)) in plan.moves.iter().enumerate() {
        println!("  {:>3}. move one slab from class {victim} to class {receiver}", step + 1);
    }
}
