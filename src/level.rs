//! Level descriptors: target, operator buttons and mode.
//!
//! Levels are immutable configuration. A selection-pool level never stores the
//! player's choice; the running [`Session`](crate::session::Session) does.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, Operation, count_combinations};
use crate::error::LevelError;

/// Auxiliary behaviour attached to a level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LevelMode {
    #[default]
    FreePlay,
    /// The player may press at most the solver's minimum number of times.
    MinimumPresses,
    /// The player answers how many press combinations reach the target.
    CombinationCount,
    /// The player picks operations from a pool before the round starts.
    SelectionRequired,
}

impl LevelMode {
    pub fn name(self) -> &'static str {
        match self {
            LevelMode::FreePlay => "free_play",
            LevelMode::MinimumPresses => "minimum_presses",
            LevelMode::CombinationCount => "combination_count",
            LevelMode::SelectionRequired => "selection_required",
        }
    }
}

/// Operator buttons of a level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum LevelOps {
    Fixed {
        ops: Vec<Operation>,
    },
    Selection {
        available_ops: Vec<Operation>,
        select_count: usize,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Level {
    pub target: f64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub ops: LevelOps,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: LevelMode,
}

impl Level {
    pub fn fixed(target: f64, ops: Vec<Operation>, mode: LevelMode) -> Self {
        Self {
            target,
            ops: LevelOps::Fixed { ops },
            mode,
        }
    }

    pub fn selection(target: f64, available_ops: Vec<Operation>, select_count: usize) -> Self {
        Self {
            target,
            ops: LevelOps::Selection {
                available_ops,
                select_count,
            },
            mode: LevelMode::SelectionRequired,
        }
    }

    pub fn requires_selection(&self) -> bool {
        matches!(self.ops, LevelOps::Selection { .. })
    }

    /// Operations offered by the level: the fixed buttons or the selection pool.
    pub fn offered_ops(&self) -> &[Operation] {
        match &self.ops {
            LevelOps::Fixed { ops } => ops,
            LevelOps::Selection { available_ops, .. } => available_ops,
        }
    }

    /// Checks authoring invariants; `index` is used only for error messages.
    pub fn validate(&self, index: usize, config: &EngineConfig) -> Result<(), LevelError> {
        if !self.target.is_finite() {
            return Err(LevelError::NonFiniteTarget {
                index,
                target: self.target,
            });
        }
        let mismatch = LevelError::ModeMismatch {
            index,
            mode: self.mode.name(),
        };
        match (&self.ops, self.mode) {
            (LevelOps::Selection { .. }, LevelMode::SelectionRequired) => {}
            (LevelOps::Selection { .. }, _) | (_, LevelMode::SelectionRequired) => return Err(mismatch),
            (LevelOps::Fixed { ops }, LevelMode::CombinationCount) => {
                count_combinations(self.target, ops, config)
                    .map_err(|source| LevelError::Combination { index, source })?;
            }
            (LevelOps::Fixed { .. }, _) => {}
        }
        if let LevelOps::Selection {
            available_ops,
            select_count,
        } = &self.ops
        {
            if *select_count == 0 || *select_count > available_ops.len() {
                return Err(LevelError::SelectCount {
                    index,
                    select_count: *select_count,
                    pool: available_ops.len(),
                });
            }
        }
        Ok(())
    }
}

/// Validates every level of a list; an empty list is rejected.
pub fn validate_levels(levels: &[Level], config: &EngineConfig) -> Result<(), LevelError> {
    if levels.is_empty() {
        return Err(LevelError::Empty);
    }
    levels
        .iter()
        .enumerate()
        .try_for_each(|(i, level)| level.validate(i, config))
}

/// Parses and validates a JSON level list.
///
/// ```json
/// [
///   { "target": 50, "ops": ["+3", "+7"] },
///   { "target": 101, "ops": ["+3", "+7"], "mode": "minimum_presses" },
///   { "target": 17, "available_ops": ["+10", "+6", "-4", "-5"], "select_count": 2,
///     "mode": "selection_required" }
/// ]
/// ```
#[cfg(feature = "serde_json")]
pub fn levels_from_json(json: &str, config: &EngineConfig) -> Result<Vec<Level>, LevelError> {
    let levels: Vec<Level> = serde_json::from_str(json)?;
    validate_levels(&levels, config)?;
    Ok(levels)
}
