//! Level-solvability engine.
//!
//! Two pure computations answer "can this level be solved, and how":
//! - [`min_presses`]: fewest operation applications from 0 to the target
//!   (breadth-first search over reachable totals);
//! - [`count_pair_combinations`]: how many press-count pairs of two additive
//!   operations land exactly on the target.
//!
//! Both are deterministic and free of side effects; the [`EngineConfig`] they
//! take carries every search bound so levels can be tuned without touching
//! the algorithms.

mod counter;
mod operation;
mod solver;

pub use counter::{count_combinations, count_pair_combinations};
pub use operation::{OpKind, Operation, parse_operations};
pub use solver::min_presses;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// BFS never enqueues a total whose magnitude exceeds `factor * |target|`.
pub const DEFAULT_MAGNITUDE_CAP_FACTOR: f64 = 2.0;
/// Press counts per operation considered by the pair counter (inclusive).
pub const DEFAULT_PAIR_WINDOW: u32 = 100;
/// Tolerance shared by the solver and the player-facing target check.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// How a computed total is compared against a level target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetMatch {
    /// Bitwise float equality. Fractional operations (`+3.9`) can miss the
    /// target through rounding.
    Exact,
    /// `|value - target| < epsilon`.
    Tolerance(f64),
}

impl TargetMatch {
    pub fn matches(self, value: f64, target: f64) -> bool {
        match self {
            TargetMatch::Exact => value == target,
            TargetMatch::Tolerance(eps) => (value - target).abs() < eps,
        }
    }
}

impl Default for TargetMatch {
    fn default() -> Self {
        TargetMatch::Tolerance(DEFAULT_TOLERANCE)
    }
}

/// Search bounds and matching policy for the solver and counter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub magnitude_cap_factor: f64,
    pub pair_window: u32,
    pub target_match: TargetMatch,
    /// Stop the BFS (reporting unreachable) once this many states were enqueued.
    pub max_visited: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            magnitude_cap_factor: DEFAULT_MAGNITUDE_CAP_FACTOR,
            pair_window: DEFAULT_PAIR_WINDOW,
            target_match: TargetMatch::default(),
            max_visited: None,
        }
    }
}

impl EngineConfig {
    /// Reference behaviour: exact float comparison everywhere.
    pub fn exact() -> Self {
        Self {
            target_match: TargetMatch::Exact,
            ..Self::default()
        }
    }

    /// Largest magnitude a BFS state may have for `target`.
    pub fn magnitude_cap(&self, target: f64) -> f64 {
        self.magnitude_cap_factor * target.abs()
    }
}
