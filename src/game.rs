//! Level progression: owns the level list, the current stage and its session.

use tracing::info;

use crate::engine::{EngineConfig, Operation};
use crate::error::GameError;
use crate::level::{Level, LevelOps, validate_levels};
use crate::session::{Session, SessionState};

/// Operations picked so far on a selection-pool level, in the order chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    chosen: Vec<usize>,
    required: usize,
}

impl Selection {
    fn new(required: usize) -> Self {
        Self {
            chosen: Vec::with_capacity(required),
            required,
        }
    }

    /// Pool indices chosen so far.
    pub fn chosen(&self) -> &[usize] {
        &self.chosen
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn is_chosen(&self, index: usize) -> bool {
        self.chosen.contains(&index)
    }

    pub fn is_complete(&self) -> bool {
        self.chosen.len() == self.required
    }
}

#[derive(Clone, Debug)]
pub enum Stage {
    Selecting(Selection),
    Playing(Session),
    /// Every level solved.
    Escaped,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Selecting(_) => "selecting",
            Stage::Playing(_) => "playing",
            Stage::Escaped => "escaped",
        }
    }
}

/// Where [`Game::advance`] landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Level(usize),
    Escaped,
}

#[derive(Clone, Debug)]
pub struct Game {
    levels: Vec<Level>,
    current: usize,
    stage: Stage,
    config: EngineConfig,
}

impl Game {
    /// Validates `levels` and loads the first one.
    pub fn new(levels: Vec<Level>, config: EngineConfig) -> Result<Self, GameError> {
        validate_levels(&levels, &config)?;
        let stage = Self::enter(&levels[0], &config)?;
        info!(levels = levels.len(), "game started");
        Ok(Self {
            levels,
            current: 0,
            stage,
            config,
        })
    }

    fn enter(level: &Level, config: &EngineConfig) -> Result<Stage, GameError> {
        match &level.ops {
            LevelOps::Fixed { ops } => Ok(Stage::Playing(Session::load(level.target, level.mode, ops, config)?)),
            LevelOps::Selection { select_count, .. } => Ok(Stage::Selecting(Selection::new(*select_count))),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level_index(&self) -> usize {
        self.current
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.stage {
            Stage::Playing(session) => Some(session),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> Result<&mut Session, GameError> {
        match &mut self.stage {
            Stage::Playing(session) => Ok(session),
            _ => Err(GameError::NotPlaying),
        }
    }

    fn selection_mut(&mut self) -> Result<&mut Selection, GameError> {
        match &mut self.stage {
            Stage::Selecting(selection) => Ok(selection),
            _ => Err(GameError::NotSelecting),
        }
    }

    pub fn press(&mut self, index: usize) -> Result<SessionState, GameError> {
        self.session_mut()?.press(index)
    }

    pub fn reset(&mut self) -> Result<(), GameError> {
        self.session_mut()?.reset();
        Ok(())
    }

    /// Deferred budget reset; harmless when the level moved on meanwhile.
    pub fn reset_if_exhausted(&mut self) -> bool {
        self.session_mut()
            .map(Session::reset_if_exhausted)
            .unwrap_or(false)
    }

    pub fn submit_combination_count(&mut self, guess: u32) -> Result<bool, GameError> {
        self.session_mut()?.submit_combination_count(guess)
    }

    /// Adds a pool candidate, or removes it when already chosen. Adding past
    /// the required count is ignored. Returns whether the candidate is now chosen.
    pub fn toggle_selection(&mut self, index: usize) -> Result<bool, GameError> {
        let len = self.level().offered_ops().len();
        if index >= len {
            return Err(GameError::CandidateIndex { index, len });
        }
        let selection = self.selection_mut()?;
        if let Some(pos) = selection.chosen.iter().position(|&i| i == index) {
            selection.chosen.remove(pos);
            Ok(false)
        } else if selection.chosen.len() < selection.required {
            selection.chosen.push(index);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Starts the round with the chosen operations.
    pub fn confirm_selection(&mut self) -> Result<&Session, GameError> {
        let selection = self.selection_mut()?;
        if !selection.is_complete() {
            return Err(GameError::SelectionIncomplete {
                required: selection.required,
                chosen: selection.chosen.len(),
            });
        }
        let chosen = selection.chosen.clone();
        let level = &self.levels[self.current];
        let pool = level.offered_ops();
        let ops: Vec<Operation> = chosen.iter().map(|&i| pool[i]).collect();
        let session = Session::load(level.target, level.mode, &ops, &self.config)?;
        let labels: Vec<String> = ops.iter().map(Operation::to_string).collect();
        info!(
            level = self.current,
            ops = %labels.join(" "),
            optimal = ?session.optimal_presses(),
            "selection confirmed"
        );
        self.stage = Stage::Playing(session);
        self.session_mut().map(|s| &*s)
    }

    /// Drops the running round of a selection level and starts choosing again.
    pub fn reselect(&mut self) -> Result<(), GameError> {
        let required = match &self.level().ops {
            LevelOps::Selection { select_count, .. } => *select_count,
            LevelOps::Fixed { .. } => return Err(GameError::NotSelecting),
        };
        self.stage = Stage::Selecting(Selection::new(required));
        Ok(())
    }

    /// Moves past a solved level.
    pub fn advance(&mut self) -> Result<Advance, GameError> {
        if !self.session().is_some_and(Session::is_solved) {
            return Err(GameError::NotSolved);
        }
        if self.current + 1 >= self.levels.len() {
            self.stage = Stage::Escaped;
            info!("all levels solved");
            return Ok(Advance::Escaped);
        }
        self.current += 1;
        self.stage = Self::enter(&self.levels[self.current], &self.config)?;
        info!(level = self.current, stage = self.stage.name(), "level loaded");
        Ok(Advance::Level(self.current))
    }
}
