//! Error types shared by the engine, level configuration and game layers.
//!
//! An unreachable target is not an error: the solver reports it as `None`.

use thiserror::Error;

use crate::engine::Operation;

/// Failure to read an operation from its textual form (`+3`, `-4`, `*2`, `/1.5`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseOperationError {
    #[error("empty operation string")]
    Empty,
    #[error("unknown operator '{0}' (expected one of + - * /)")]
    UnknownOperator(char),
    #[error("invalid magnitude '{0}'")]
    InvalidMagnitude(String),
    #[error("magnitude must be finite and non-negative, got {0}")]
    OutOfRange(f64),
}

/// Conditions under which the combination counter has no answer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Only pairs of operations can be counted.
    #[error("combination counting needs exactly 2 operations, got {0}")]
    UnsupportedOperandCount(usize),
    #[error("operation {0} has no additive delta")]
    NotAdditive(Operation),
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {index}: target must be finite, got {target}")]
    NonFiniteTarget { index: usize, target: f64 },
    #[error("level {index}: mode {mode} does not match its operation layout")]
    ModeMismatch { index: usize, mode: &'static str },
    #[error("level {index}: select_count {select_count} must be between 1 and {pool}")]
    SelectCount {
        index: usize,
        select_count: usize,
        pool: usize,
    },
    #[error("level {index}: {source}")]
    Combination {
        index: usize,
        #[source]
        source: EngineError,
    },
    #[error("level list is empty")]
    Empty,
    #[cfg(feature = "serde_json")]
    #[error("level JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no level is being played")]
    NotPlaying,
    #[error("current level has no operation selection")]
    NotSelecting,
    #[error("operation index {index} out of range ({len} operations)")]
    OperationIndex { index: usize, len: usize },
    #[error("candidate index {index} out of range ({len} candidates)")]
    CandidateIndex { index: usize, len: usize },
    #[error("buttons are locked while the level is {0}")]
    Locked(&'static str),
    #[error("choose exactly {required} operations ({chosen} chosen)")]
    SelectionIncomplete { required: usize, chosen: usize },
    #[error("level is not solved yet")]
    NotSolved,
    #[error("level is not a combination-count level")]
    NotCombinationLevel,
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Level(#[from] LevelError),
}
