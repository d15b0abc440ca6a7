//! Footprint computation.
//!
//! The footprint `fp(w)` of a class is the expected number of distinct keys
//! referenced in a sliding window of `w` consecutive accesses to that class.
//! Averaged over all `n - w + 1` window positions:
//!
//! ```text
//! fp(w) = m - (F(w) + L(w) + R(w)) / (n - w + 1)
//! ```
//!
//! where `F(w)` charges keys first seen after position `w`, `L(w)` the
//! mirror image from the end, and `R(w)` reuse pairs too far apart to share
//! a window. All three shrink as `w` grows, which the sweep below exploits
//! to get the whole curve in O(n).

use super::window_stats::ClassStats;

/// `fp(w)` for all `w in [0, n]`. Index `w` holds `fp(w)`; `fp(0) = 0` and
/// `fp(n) = m`. Empty when the class has no accesses.
pub(crate) fn footprint_curve(stats: &ClassStats) -> Vec<f64> {
    let n = stats.n;
    if n == 0 {
        return Vec::new();
    }
    let m = stats.m as f64;
    let max_distance = n - 1;

    // Suffix sums over the reuse histogram:
    //   reuse_weight[w] = sum_{t >= w} t * R[t]
    //   reuse_count[w]  = sum_{t >= w} R[t]
    // so R(w) = reuse_weight[w+1] - w * reuse_count[w+1].
    let mut reuse_weight = vec![0.0f64; max_distance + 2];
    let mut reuse_count = vec![0.0f64; max_distance + 2];
    for t in (1..=max_distance).rev() {
        let count = stats.reuse_hist[t] as f64;
        reuse_weight[t] = reuse_weight[t + 1] + (t as f64) * count;
        reuse_count[t] = reuse_count[t + 1] + count;
    }

    // First/last access positions as counting histograms. First positions
    // are 1-indexed; last positions are counted from the window's end. Both
    // value ranges are [1, n], so a histogram replaces sorting.
    let mut first_hist = vec![0u64; n + 1];
    for &index in stats.first_access.values() {
        first_hist[index + 1] += 1;
    }
    let mut last_hist = vec![0u64; n + 1];
    for &index in stats.last_access.values() {
        last_hist[n - index] += 1;
    }

    let mut first_tail_sum: f64 = first_hist
        .iter()
        .enumerate()
        .map(|(value, &count)| (value as f64) * (count as f64))
        .sum();
    let mut first_tail_count: u64 = stats.m as u64;
    let mut last_tail_sum: f64 = last_hist
        .iter()
        .enumerate()
        .map(|(value, &count)| (value as f64) * (count as f64))
        .sum();
    let mut last_tail_count: u64 = stats.m as u64;

    let mut curve = vec![0.0f64; n + 1];
    for w in 1..=n {
        // Positions <= w no longer contribute; drop them from the tails.
        first_tail_sum -= (w as f64) * (first_hist[w] as f64);
        first_tail_count -= first_hist[w];
        let first_part = first_tail_sum - (w as f64) * (first_tail_count as f64);

        last_tail_sum -= (w as f64) * (last_hist[w] as f64);
        last_tail_count -= last_hist[w];
        let last_part = last_tail_sum - (w as f64) * (last_tail_count as f64);

        let reuse_part = if w + 1 <= max_distance {
            reuse_weight[w + 1] - (w as f64) * reuse_count[w + 1]
        } else {
            0.0
        };

        let windows = (n - w + 1) as f64;
        curve[w] = m - (first_part + last_part + reuse_part) / windows;
    }
    curve
}
