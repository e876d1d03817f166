//! Pair-combination counter for the "how many ways?" challenge.

use tracing::debug;

use super::{EngineConfig, Operation};
use crate::error::EngineError;

/// Counts pairs `(x, y)` in `0..=config.pair_window` with
/// `delta_a * x + delta_b * y` matching `target`.
///
/// Brute force over the window; solutions needing more presses of either
/// operation than the window allows are not counted.
pub fn count_pair_combinations(target: f64, delta_a: f64, delta_b: f64, config: &EngineConfig) -> u32 {
    let window = config.pair_window;
    let mut count = 0;
    for x in 0..=window {
        for y in 0..=window {
            let sum = delta_a * f64::from(x) + delta_b * f64::from(y);
            if config.target_match.matches(sum, target) {
                count += 1;
            }
        }
    }
    count
}

/// Counts press combinations of exactly two additive operations reaching `target`.
///
/// Any other operand count has no answer; callers must not read it as zero.
pub fn count_combinations(target: f64, ops: &[Operation], config: &EngineConfig) -> Result<u32, EngineError> {
    let [a, b] = ops else {
        return Err(EngineError::UnsupportedOperandCount(ops.len()));
    };
    let delta_a = a.delta().ok_or(EngineError::NotAdditive(*a))?;
    let delta_b = b.delta().ok_or(EngineError::NotAdditive(*b))?;
    let count = count_pair_combinations(target, delta_a, delta_b, config);
    debug!(goal = target, %a, %b, count, "pair combinations counted");
    Ok(count)
}
