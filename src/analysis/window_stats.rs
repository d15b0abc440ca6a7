//! Per-class statistics pass over a snapshot.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::window::{ClassId, WindowSnapshot};

/// Window statistics for one class.
///
/// Indices are class-local: the i-th access to this class within the
/// snapshot has index `i`, regardless of interleaving with other classes.
pub(crate) struct ClassStats {
    /// Total accesses to this class in the snapshot.
    pub n: usize,
    /// Distinct key fingerprints.
    pub m: usize,
    /// Key fingerprint -> class-local index of its first occurrence.
    pub first_access: HashMap<u64, usize>,
    /// Key fingerprint -> class-local index of its last occurrence so far.
    pub last_access: HashMap<u64, usize>,
    /// `reuse_hist[t]` counts successive same-key accesses at class-local
    /// distance `t`. Length `n`; index 0 is never used.
    pub reuse_hist: Vec<u64>,
}

/// Walk the snapshot in logical order and build per-class statistics.
///
/// Two passes: the first counts accesses per class so each reuse histogram
/// can be allocated at its exact final length, the second fills the access
/// tables and histograms.
pub(crate) fn collect(snapshot: &WindowSnapshot<'_>) -> BTreeMap<ClassId, ClassStats> {
    let mut counts: BTreeMap<ClassId, usize> = BTreeMap::new();
    for record in snapshot.iter() {
        *counts.entry(record.class_id).or_insert(0) += 1;
    }

    let mut stats: BTreeMap<ClassId, ClassStats> = counts
        .into_iter()
        .map(|(class_id, n)| {
            (
                class_id,
                ClassStats {
                    n: 0,
                    m: 0,
                    first_access: HashMap::new(),
                    last_access: HashMap::new(),
                    reuse_hist: vec![0; n],
                },
            )
        })
        .collect();

    for record in snapshot.iter() {
        let Some(class) = stats.get_mut(&record.class_id) else {
            continue;
        };
        // `n` doubles as the running class-local index during this pass.
        let index = class.n;
        class.n += 1;

        class.first_access.entry(record.key_hash).or_insert(index);
        match class.last_access.entry(record.key_hash) {
            Entry::Occupied(mut previous) => {
                let distance = index - *previous.get();
                class.reuse_hist[distance] += 1;
                *previous.get_mut() = index;
            }
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }
    }

    for class in stats.values_mut() {
        class.m = class.first_access.len();
    }
    stats
}
