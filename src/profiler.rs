//! Profiler facade.
//!
//! [`MrcProfiler`] owns the access window and wires snapshots into the
//! analyzer and solver. All operations are synchronous and run in the
//! caller's thread; the expected setup is many serving threads calling
//! [`MrcProfiler::feed`] and one rebalancer thread calling the query and
//! solve operations.

use std::collections::BTreeMap;

use crate::analysis::{ClassMrc, WindowAnalysis};
use crate::config::OximrcConfig;
use crate::constants::DEFAULT_WINDOW_CAPACITY;
use crate::error::ProfilerError;
use crate::fingerprint::fingerprint;
use crate::solver::{self, ReallocationPlan, SolveStrategy};
use crate::stats::ProfilerStats;
use crate::window::{AccessWindow, ClassId};

/// Footprint-based MRC profiler and slab reallocation solver.
pub struct MrcProfiler {
    window: AccessWindow,
    stats: ProfilerStats,
}

impl MrcProfiler {
    /// Create a profiler whose window holds `capacity` accesses.
    pub fn new(capacity: usize) -> Result<Self, ProfilerError> {
        Ok(Self {
            window: AccessWindow::new(capacity)?,
            stats: ProfilerStats::new(),
        })
    }

    /// Create a profiler with the default window capacity
    /// ([`DEFAULT_WINDOW_CAPACITY`]).
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY).expect("default capacity is valid")
    }

    /// Create a profiler from loaded configuration.
    pub fn from_config(config: &OximrcConfig) -> Result<Self, ProfilerError> {
        Self::new(config.window_capacity())
    }

    /// Record one access. Called from the serving path; O(1) under the
    /// window lock and never fails.
    pub fn feed(&self, key: &[u8], class_id: ClassId) {
        self.stats.record_feed();
        self.window.feed(fingerprint(key), class_id);
    }

    /// Total expected footprint at each requested cache size (in objects),
    /// summed over all classes in the window. All zeros when the window is
    /// empty.
    pub fn query_footprint(&self, cache_sizes: &[usize]) -> Vec<f64> {
        self.stats.record_footprint_query();
        self.analyze().query_footprint(cache_sizes)
    }

    /// Per-class miss-ratio curves at slab counts `0..=max_slabs`.
    ///
    /// `allocs_per_slab` gives the objects-per-slab granularity per class;
    /// classes mapped to zero or absent from the window yield no entry.
    pub fn query_mrc(
        &self,
        allocs_per_slab: &BTreeMap<ClassId, usize>,
        max_slabs: usize,
    ) -> BTreeMap<ClassId, ClassMrc> {
        self.stats.record_mrc_query();
        self.analyze().query_mrc(allocs_per_slab, max_slabs)
    }

    /// Solve for the minimum-miss redistribution of the current slab budget
    /// using the default (exact DP) strategy.
    pub fn solve_slab_reallocation(
        &self,
        allocs_per_slab: &BTreeMap<ClassId, usize>,
        current_allocation: &BTreeMap<ClassId, usize>,
    ) -> ReallocationPlan {
        self.solve_slab_reallocation_with(
            allocs_per_slab,
            current_allocation,
            SolveStrategy::default(),
        )
    }

    /// Solve with an explicit allocation strategy.
    ///
    /// The budget is `sum(current_allocation)` and is conserved. Degenerate
    /// inputs (empty window, no profiled classes) return
    /// [`ReallocationPlan::empty`]. Whether the improvement is worth
    /// applying is the caller's decision; both `mr_old` and `mr_new` are
    /// reported for that purpose.
    pub fn solve_slab_reallocation_with(
        &self,
        allocs_per_slab: &BTreeMap<ClassId, usize>,
        current_allocation: &BTreeMap<ClassId, usize>,
        strategy: SolveStrategy,
    ) -> ReallocationPlan {
        self.stats.record_solve();
        let budget: usize = current_allocation.values().sum();
        let mrc = self.analyze().query_mrc(allocs_per_slab, budget);
        let plan = solver::solve(&mrc, current_allocation, budget, strategy);
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(
                budget,
                classes = mrc.len(),
                moves = plan.moves.len(),
                mr_old = plan.mr_old,
                mr_new = plan.mr_new,
                strategy = ?strategy,
                "slab reallocation solved"
            );
        }
        plan
    }

    /// Clear the window and start a fresh analysis period. Storage is
    /// retained.
    pub fn reset(&self) {
        self.stats.record_reset();
        self.window.reset();
        tracing::debug!("analysis window reset");
    }

    /// Operation counters for this profiler instance.
    pub fn stats(&self) -> &ProfilerStats {
        &self.stats
    }

    /// Number of accesses currently in the window.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether the window holds no accesses.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Window capacity in accesses.
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Snapshot the window and run the statistics pass, outside the feed
    /// lock.
    fn analyze(&self) -> WindowAnalysis {
        self.stats.record_snapshot();
        let snapshot = self.window.snapshot();
        WindowAnalysis::from_snapshot(&snapshot)
    }
}
