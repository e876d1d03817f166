//! Shortest-path solver: fewest presses from 0 to the target.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use super::{EngineConfig, Operation};

/// One BFS frontier entry: a total and how many presses produced it.
#[derive(Clone, Copy, Debug)]
struct SearchState {
    value: f64,
    steps: u32,
}

// Totals are deduplicated by bit pattern; -0.0 and 0.0 are the same total.
fn state_key(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

/// Minimum number of operation applications turning 0 into `target`.
///
/// Plain unweighted BFS over reachable totals. Every total is enqueued at
/// most once and only while `|total| <= config.magnitude_cap(target)`, which
/// keeps multiplicative or overshooting operation sets finite. The cap also
/// hides solutions that must pass above it (e.g. `+5, -4` towards 1), which
/// are reported as unreachable.
///
/// Returns `None` when the target cannot be reached or is not finite;
/// `Some(0)` only when the target itself matches 0.
pub fn min_presses(target: f64, ops: &[Operation], config: &EngineConfig) -> Option<u32> {
    if !target.is_finite() {
        debug!(goal = target, "target not finite");
        return None;
    }
    let cap = config.magnitude_cap(target);
    let mut queue = VecDeque::from([SearchState { value: 0.0, steps: 0 }]);
    let mut seen: HashSet<u64> = HashSet::from([state_key(0.0)]);

    while let Some(SearchState { value, steps }) = queue.pop_front() {
        if config.target_match.matches(value, target) {
            debug!(goal = target, steps, explored = seen.len(), "target reachable");
            return Some(steps);
        }

        for op in ops {
            let next = op.apply(value);
            // NaN and infinities fail this comparison and are dropped.
            if !(next.abs() <= cap) {
                continue;
            }
            if !seen.insert(state_key(next)) {
                continue;
            }
            if config.max_visited.is_some_and(|limit| seen.len() > limit) {
                debug!(goal = target, limit = seen.len() - 1, "search limit reached");
                return None;
            }
            queue.push_back(SearchState { value: next, steps: steps + 1 });
        }
    }

    debug!(goal = target, explored = seen.len(), "target unreachable");
    None
}
