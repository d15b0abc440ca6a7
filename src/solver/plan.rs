//! Reassignment plan construction.
//!
//! The allocation delta per class is expanded into one queue entry per
//! slab; victims and receivers are then paired positionally. Victims are
//! released cheapest-first (lowest access-per-slab pressure) to keep the
//! hit ratio stable while the host applies the plan move by move.

use std::collections::{BTreeMap, BTreeSet};

use crate::window::ClassId;

/// Expand allocation deltas into ordered `(victim, receiver)` slab moves.
pub(crate) fn build_moves(
    all_classes: &BTreeSet<ClassId>,
    optimal: &BTreeMap<ClassId, usize>,
    current: &BTreeMap<ClassId, usize>,
    access_frequencies: &BTreeMap<ClassId, usize>,
) -> Vec<(ClassId, ClassId)> {
    let mut victims = Vec::new();
    let mut receivers = Vec::new();
    for &class_id in all_classes {
        let current_slabs = current.get(&class_id).copied().unwrap_or(0);
        let optimal_slabs = optimal.get(&class_id).copied().unwrap_or(0);
        if optimal_slabs < current_slabs {
            victims.extend(std::iter::repeat_n(class_id, current_slabs - optimal_slabs));
        } else if optimal_slabs > current_slabs {
            receivers.extend(std::iter::repeat_n(class_id, optimal_slabs - current_slabs));
        }
    }

    victims.sort_by(|&a, &b| {
        pressure(a, access_frequencies, current).total_cmp(&pressure(b, access_frequencies, current))
    });

    victims.into_iter().zip(receivers).collect()
}

/// Accesses per currently held slab; classes with no profile or no slabs
/// score infinite and are moved last.
fn pressure(
    class_id: ClassId,
    access_frequencies: &BTreeMap<ClassId, usize>,
    current: &BTreeMap<ClassId, usize>,
) -> f64 {
    match (access_frequencies.get(&class_id), current.get(&class_id)) {
        (Some(&accesses), Some(&slabs)) if slabs > 0 => accesses as f64 / slabs as f64,
        _ => f64::INFINITY,
    }
}
