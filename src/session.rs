//! Per-level play state: running total, press counts and the derived goal.
//!
//! A [`Session`] is created when a level (or a confirmed selection) loads and
//! is driven by discrete press / reset events. Solver and counter run exactly
//! once, inside [`Session::load`].

use tracing::{debug, warn};

use crate::engine::{EngineConfig, Operation, TargetMatch, count_combinations, min_presses};
use crate::error::GameError;
use crate::level::LevelMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Solved,
    /// More presses than the budget allows; buttons stay locked until reset.
    BudgetExceeded,
}

impl SessionState {
    pub fn name(self) -> &'static str {
        match self {
            SessionState::InProgress => "in_progress",
            SessionState::Solved => "solved",
            SessionState::BudgetExceeded => "budget_exceeded",
        }
    }
}

/// One operator button and how often it was pressed since the last reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressCount {
    pub op: Operation,
    pub count: u32,
}

#[derive(Clone, Debug)]
pub struct Session {
    target: f64,
    mode: LevelMode,
    presses: Vec<PressCount>,
    total: f64,
    state: SessionState,
    target_match: TargetMatch,
    press_budget: Option<u32>,
    combination_answer: Option<u32>,
    optimal_presses: Option<u32>,
}

impl Session {
    /// Starts a level with the given operator buttons.
    ///
    /// `MinimumPresses` computes the press budget; an unreachable target
    /// leaves it unset so nothing is enforced. `CombinationCount` computes
    /// the expected answer and fails when the operation set has none.
    pub fn load(target: f64, mode: LevelMode, ops: &[Operation], config: &EngineConfig) -> Result<Self, GameError> {
        let mut session = Self {
            target,
            mode,
            presses: ops.iter().map(|&op| PressCount { op, count: 0 }).collect(),
            total: 0.0,
            state: SessionState::InProgress,
            target_match: config.target_match,
            press_budget: None,
            combination_answer: None,
            optimal_presses: None,
        };
        match mode {
            LevelMode::MinimumPresses => {
                session.optimal_presses = min_presses(target, ops, config);
                session.press_budget = session.optimal_presses;
                if session.press_budget.is_none() {
                    warn!(goal = target, "press budget level is unreachable; budget not enforced");
                }
            }
            LevelMode::SelectionRequired => {
                session.optimal_presses = min_presses(target, ops, config);
            }
            LevelMode::CombinationCount => {
                session.combination_answer = Some(count_combinations(target, ops, config)?);
            }
            LevelMode::FreePlay => {}
        }
        session.state = session.resting_state();
        debug!(
            goal = target,
            mode = mode.name(),
            budget = ?session.press_budget,
            optimal = ?session.optimal_presses,
            "session loaded"
        );
        Ok(session)
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn mode(&self) -> LevelMode {
        self.mode
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn presses(&self) -> &[PressCount] {
        &self.presses
    }

    pub fn total_presses(&self) -> u32 {
        self.presses.iter().map(|p| p.count).sum()
    }

    pub fn press_budget(&self) -> Option<u32> {
        self.press_budget
    }

    /// Presses left before the budget runs out; `None` without a budget.
    pub fn remaining_presses(&self) -> Option<u32> {
        self.press_budget
            .map(|budget| budget.saturating_sub(self.total_presses()))
    }

    pub fn combination_answer(&self) -> Option<u32> {
        self.combination_answer
    }

    /// Solver result for the playing operation set, when the mode asked for it.
    pub fn optimal_presses(&self) -> Option<u32> {
        self.optimal_presses
    }

    pub fn is_solved(&self) -> bool {
        self.state == SessionState::Solved
    }

    /// Whether the running total counts as the target under the engine's policy.
    pub fn on_target(&self) -> bool {
        self.target_match.matches(self.total, self.target)
    }

    /// Applies the `index`-th operation and updates the state.
    pub fn press(&mut self, index: usize) -> Result<SessionState, GameError> {
        if self.state != SessionState::InProgress {
            return Err(GameError::Locked(self.state.name()));
        }
        let len = self.presses.len();
        let slot = self
            .presses
            .get_mut(index)
            .ok_or(GameError::OperationIndex { index, len })?;
        self.total = slot.op.apply(self.total);
        slot.count += 1;

        if self.mode != LevelMode::CombinationCount && self.on_target() {
            self.state = SessionState::Solved;
        } else if self
            .press_budget
            .is_some_and(|budget| self.total_presses() > budget)
        {
            self.state = SessionState::BudgetExceeded;
        }
        Ok(self.state)
    }

    /// Zeroes the total and every press count. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.total = 0.0;
        for p in &mut self.presses {
            p.count = 0;
        }
        // An answered combination level stays solved.
        if self.mode != LevelMode::CombinationCount || !self.is_solved() {
            self.state = self.resting_state();
        }
    }

    fn resting_state(&self) -> SessionState {
        if self.mode != LevelMode::CombinationCount && self.on_target() {
            SessionState::Solved
        } else {
            SessionState::InProgress
        }
    }

    /// Deferred reset after the budget ran out. A no-op unless the session is
    /// still exhausted, so a late timer cannot wipe fresh progress.
    pub fn reset_if_exhausted(&mut self) -> bool {
        if self.state != SessionState::BudgetExceeded {
            return false;
        }
        self.reset();
        true
    }

    /// Checks the player's answer to a combination-count level.
    pub fn submit_combination_count(&mut self, guess: u32) -> Result<bool, GameError> {
        let answer = self.combination_answer.ok_or(GameError::NotCombinationLevel)?;
        let correct = guess == answer;
        if correct {
            self.state = SessionState::Solved;
        }
        debug!(guess, correct, "combination answer submitted");
        Ok(correct)
    }
}
