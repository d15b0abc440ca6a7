//! Profiler operation counters.
//!
//! Informational only; all counters use relaxed atomics and may lag in-
//! flight operations by a call or two when read concurrently.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one profiler instance.
pub struct ProfilerStats {
    /// Accesses recorded via feed.
    feeds: AtomicU64,
    /// Ring snapshots taken (one per query or solve).
    snapshots: AtomicU64,
    /// Footprint queries served.
    footprint_queries: AtomicU64,
    /// MRC queries served through the public API.
    mrc_queries: AtomicU64,
    /// Reallocation solves.
    solves: AtomicU64,
    /// Window resets.
    resets: AtomicU64,
}

impl ProfilerStats {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self {
            feeds: AtomicU64::new(0),
            snapshots: AtomicU64::new(0),
            footprint_queries: AtomicU64::new(0),
            mrc_queries: AtomicU64::new(0),
            solves: AtomicU64::new(0),
            resets: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_feed(&self) {
        self.feeds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_snapshot(&self) {
        self.snapshots.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_footprint_query(&self) {
        self.footprint_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_mrc_query(&self) {
        self.mrc_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_solve(&self) {
        self.solves.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Accesses recorded so far.
    pub fn feeds(&self) -> u64 {
        self.feeds.load(Ordering::Relaxed)
    }

    /// Snapshots taken so far.
    pub fn snapshots(&self) -> u64 {
        self.snapshots.load(Ordering::Relaxed)
    }

    /// Footprint queries served so far.
    pub fn footprint_queries(&self) -> u64 {
        self.footprint_queries.load(Ordering::Relaxed)
    }

    /// MRC queries served so far.
    pub fn mrc_queries(&self) -> u64 {
        self.mrc_queries.load(Ordering::Relaxed)
    }

    /// Reallocation solves so far.
    pub fn solves(&self) -> u64 {
        self.solves.load(Ordering::Relaxed)
    }

    /// Window resets so far.
    pub fn resets(&self) -> u64 {
        self.resets.load(Ordering::Relaxed)
    }

    /// Zero all counters.
    pub fn reset(&self) {
        self.feeds.store(0, Ordering::Relaxed);
        self.snapshots.store(0, Ordering::Relaxed);
        self.footprint_queries.store(0, Ordering::Relaxed);
        self.mrc_queries.store(0, Ordering::Relaxed);
        self.solves.store(0, Ordering::Relaxed);
        self.resets.store(0, Ordering::Relaxed);
    }

    /// Get a point-in-time copy of all counters.
    pub fn summary(&self) -> ProfilerStatsSummary {
        ProfilerStatsSummary {
            feeds: self.feeds(),
            snapshots: self.snapshots(),
            footprint_queries: self.footprint_queries(),
            mrc_queries: self.mrc_queries(),
            solves: self.solves(),
            resets: self.resets(),
        }
    }
}

impl Default for ProfilerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-data copy of [`ProfilerStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilerStatsSummary {
    /// Accesses recorded.
    pub feeds: u64,
    /// Snapshots taken.
    pub snapshots: u64,
    /// Footprint queries served.
    pub footprint_queries: u64,
    /// MRC queries served.
    pub mrc_queries: u64,
    /// Reallocation solves.
    pub solves: u64,
    /// Window resets.
    pub resets: u64,
}
