//! Footprint analysis over a window snapshot.
//!
//! Everything here is ephemeral: a [`WindowAnalysis`] is built from one
//! snapshot, serves one query, and is dropped. The ring is never touched
//! while analysis runs.

mod footprint;
mod mrc;
mod window_stats;

pub use mrc::ClassMrc;
pub(crate) use mrc::miss_ratio_at;

use std::collections::BTreeMap;

use crate::window::{ClassId, WindowSnapshot};
use self::window_stats::ClassStats;

/// Per-class statistics derived from one window snapshot.
pub(crate) struct WindowAnalysis {
    per_class: BTreeMap<ClassId, ClassStats>,
}

impl WindowAnalysis {
    /// Run the statistics pass over a snapshot.
    pub(crate) fn from_snapshot(snapshot: &WindowSnapshot<'_>) -> Self {
        Self {
            per_class: window_stats::collect(snapshot),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.per_class.is_empty()
    }

    /// Total expected footprint at each requested cache size (in objects):
    /// `sum over classes of fp_c(min(size, n_c))`. All zeros when the window
    /// is empty.
    pub(crate) fn query_footprint(&self, cache_sizes: &[usize]) -> Vec<f64> {
        if self.per_class.is_empty() {
            return vec![0.0; cache_sizes.len()];
        }

        let curves: Vec<(usize, Vec<f64>)> = self
            .per_class
            .values()
            .map(|stats| (stats.n, footprint::footprint_curve(stats)))
            .collect();

        cache_sizes
            .iter()
            .map(|&size| {
                curves
                    .iter()
                    .map(|(n, curve)| {
                        let w = size.min(*n);
                        curve.get(w).copied().unwrap_or(0.0)
                    })
                    .sum()
            })
            .collect()
    }

    /// Per-class miss-ratio curves for slab counts `0..=max_slabs`.
    ///
    /// One entry per class present both in the window and in
    /// `allocs_per_slab`; classes with zero allocs-per-slab are skipped. An
    /// empty window yields an empty map.
    pub(crate) fn query_mrc(
        &self,
        allocs_per_slab: &BTreeMap<ClassId, usize>,
        max_slabs: usize,
    ) -> BTreeMap<ClassId, ClassMrc> {
        let mut result = BTreeMap::new();
        for (&class_id, &allocs) in allocs_per_slab {
            if allocs == 0 {
                continue;
            }
            let Some(stats) = self.per_class.get(&class_id) else {
                continue;
            };
            let curve = footprint::footprint_curve(stats);
            result.insert(class_id, mrc::class_mrc(stats, &curve, allocs, max_slabs));
        }
        result
    }
}
