//! Feed a synthetic trace and print footprint and miss-ratio curves.
//!
//! Run with: `cargo run --example basic_profile`

use std::collections::BTreeMap;

use oximrc::{ClassId, MrcProfiler};

fn main() {
    let profiler = MrcProfiler::new(100_000).expect("valid capacity");

    // Class 0: 10k accesses cycling over 100 keys (tight locality).
    // Class 1: 10k accesses over 5k keys (mostly compulsory misses).
    for i in 0..10_000u64 {
        profiler.feed((i % 100).to_string().as_bytes(), 0);
        profiler.feed((100 + i % 5_000).to_string().as_bytes(), 1);
    }

    println!("window: {} / {} accesses", profiler.len(), profiler.capacity());

    let sizes: Vec<usize> = vec![10, 100, 1_000, 5_000];
    let footprint = profiler.query_footprint(&sizes);
    println!("\nfootprint (expected distinct keys per window length):");
    for (size, value) in sizes.iter().zip(&footprint) {
        println!("  w = {size:>5}  fp = {value:10.2}");
    }

    let allocs_per_slab: BTreeMap<ClassId, usize> = [(0, 50), (1, 50)].into_iter().collect();
    let mrc = profiler.query_mrc(&allocs_per_slab, 8);
    println!("\nmiss-ratio curves (objects per slab: 50):");
    for (class_id, curve) in &mrc {
        print!("  class {class_id} ({} accesses):", curve.accesses);
        for (slabs, miss_ratio) in &curve.points {
            print!(" {slabs}:{miss_ratio:.3}");
        }
        println!();
    }
}
