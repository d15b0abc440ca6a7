//! Slab reallocation solving.
//!
//! Given per-class miss-ratio curves and the current slab split, find the
//! allocation of the same total budget that minimizes expected misses, and
//! turn the difference into an ordered list of single-slab moves.

mod dp;
mod greedy;
mod plan;

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::{ClassMrc, miss_ratio_at};
use crate::window::ClassId;

/// Allocation strategy used by the solve path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveStrategy {
    /// Knapsack-style dynamic program; exact minimum-miss allocation.
    #[default]
    Dp,
    /// Marginal-utility greedy: hand out one slab at a time to the class
    /// with the largest remaining miss reduction. Much cheaper than the DP
    /// and equal to it on concave curves.
    Greedy,
}

/// Result of a slab reallocation solve.
#[derive(Debug, Clone, PartialEq)]
pub struct ReallocationPlan {
    /// Access-weighted miss rate under the current allocation.
    pub mr_old: f64,
    /// Access-weighted miss rate under the proposed allocation.
    pub mr_new: f64,
    /// Proposed slab count per class, covering the union of profiled
    /// classes and classes in the current allocation.
    pub optimal_allocation: BTreeMap<ClassId, usize>,
    /// Ordered `(victim, receiver)` pairs; each pair moves exactly one
    /// slab. Victims are ordered by ascending access-per-slab pressure
    /// (cheapest slabs released first); receivers by ascending class id.
    pub moves: Vec<(ClassId, ClassId)>,
    /// Window access count per profiled class.
    pub access_frequencies: BTreeMap<ClassId, usize>,
}

impl ReallocationPlan {
    /// The all-zero plan returned for degenerate inputs.
    pub fn empty() -> Self {
        Self {
            mr_old: 0.0,
            mr_new: 0.0,
            optimal_allocation: BTreeMap::new(),
            moves: Vec::new(),
            access_frequencies: BTreeMap::new(),
        }
    }
}

/// Solve for the minimum-miss allocation of `budget` slabs.
///
/// Total: an empty MRC view yields [`ReallocationPlan::empty`]. The budget
/// is conserved exactly; `optimal_allocation` sums to `budget`.
pub(crate) fn solve(
    mrc: &BTreeMap<ClassId, ClassMrc>,
    current_allocation: &BTreeMap<ClassId, usize>,
    budget: usize,
    strategy: SolveStrategy,
) -> ReallocationPlan {
    if mrc.is_empty() {
        return ReallocationPlan::empty();
    }

    let access_frequencies: BTreeMap<ClassId, usize> = mrc
        .iter()
        .map(|(&class_id, curve)| (class_id, curve.accesses))
        .collect();

    let counts = match strategy {
        SolveStrategy::Dp => {
            // Expected misses per class at every candidate slab count.
            let costs: Vec<Vec<f64>> = mrc
                .values()
                .map(|curve| {
                    (0..=budget)
                        .map(|slabs| curve.accesses as f64 * miss_ratio_at(&curve.points, slabs))
                        .collect()
                })
                .collect();
            dp::optimize(&costs, budget)
        }
        SolveStrategy::Greedy => greedy::optimize(mrc, budget),
    };

    let mut optimal_allocation: BTreeMap<ClassId, usize> =
        mrc.keys().copied().zip(counts).collect();

    // The answer covers every class that is profiled or currently holds
    // slabs; classes outside the MRC view get zero.
    let all_classes: BTreeSet<ClassId> = mrc
        .keys()
        .chain(current_allocation.keys())
        .copied()
        .collect();
    for &class_id in &all_classes {
        optimal_allocation.entry(class_id).or_insert(0);
    }

    let expected_misses = |allocation: &BTreeMap<ClassId, usize>| -> f64 {
        allocation
            .iter()
            .filter_map(|(class_id, &slabs)| {
                mrc.get(class_id)
                    .map(|curve| curve.accesses as f64 * miss_ratio_at(&curve.points, slabs))
            })
            .sum()
    };

    let total_accesses: usize = access_frequencies.values().sum();
    let (mr_old, mr_new) = if total_accesses > 0 {
        let total = total_accesses as f64;
        (
            expected_misses(current_allocation) / total,
            expected_misses(&optimal_allocation) / total,
        )
    } else {
        (0.0, 0.0)
    };

    let moves = plan::build_moves(
        &all_classes,
        &optimal_allocation,
        current_allocation,
        &access_frequencies,
    );

    ReallocationPlan {
        mr_old,
        mr_new,
        optimal_allocation,
        moves,
        access_frequencies,
    }
}
