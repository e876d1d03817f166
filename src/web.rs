//! Browser bindings for the JavaScript presentation layer.
//!
//! The page owns every DOM element; it creates a [`GameHandle`], forwards
//! button clicks to it, subscribes with `onChange` and re-renders from the
//! getters. No game state lives in globals: the deferred budget reset closes
//! over the handle's own `Rc`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::engine::{self, EngineConfig, parse_operations};
use crate::game::{Advance, Game, Stage};
use crate::level::{Level, LevelMode};
use crate::levels::default_levels;
use crate::session::SessionState;

/// Delay before an exhausted press budget resets the level.
pub const BUDGET_RESET_DELAY_MS: i32 = 1500;

type Listener = Rc<RefCell<Option<js_sys::Function>>>;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Minimum presses from 0 to `target` with textual operations; `undefined` when unreachable.
#[wasm_bindgen(js_name = minPresses)]
pub fn js_min_presses(target: f64, ops: Vec<String>) -> Result<Option<u32>, JsValue> {
    let ops = parse_operations(&ops).map_err(to_js)?;
    Ok(engine::min_presses(target, &ops, &EngineConfig::default()))
}

#[wasm_bindgen(js_name = countPairCombinations)]
pub fn js_count_pair_combinations(target: f64, delta_a: f64, delta_b: f64) -> u32 {
    engine::count_pair_combinations(target, delta_a, delta_b, &EngineConfig::default())
}

#[wasm_bindgen]
pub struct GameHandle {
    game: Rc<RefCell<Game>>,
    listener: Listener,
}

impl GameHandle {
    fn with_levels(levels: Vec<Level>) -> Result<GameHandle, JsValue> {
        let game = Game::new(levels, EngineConfig::default()).map_err(to_js)?;
        Ok(GameHandle {
            game: Rc::new(RefCell::new(game)),
            listener: Rc::new(RefCell::new(None)),
        })
    }

    // Runs `f` against the game, releases the borrow, then tells the page.
    fn update<T, E: std::fmt::Display>(&self, f: impl FnOnce(&mut Game) -> Result<T, E>) -> Result<T, JsValue> {
        let out = {
            let mut game = self.game.borrow_mut();
            f(&mut *game).map_err(to_js)?
        };
        notify(&self.listener);
        Ok(out)
    }

    fn schedule_budget_reset(&self) -> Result<(), JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let game = Rc::clone(&self.game);
        let listener = Rc::clone(&self.listener);
        let callback = Closure::once_into_js(move || {
            reset_exhausted(&game, &listener);
        });
        win.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), BUDGET_RESET_DELAY_MS)?;
        Ok(())
    }
}

// Unlocks a level whose press budget ran out; no-op once it has moved on.
fn reset_exhausted(game: &RefCell<Game>, listener: &Listener) -> bool {
    let changed = game.borrow_mut().reset_if_exhausted();
    if changed {
        debug!("press budget reset");
        notify(listener);
    }
    changed
}

fn notify(listener: &Listener) {
    // Cloned so the callback may call `onChange` again.
    let callback = listener.borrow().clone();
    if let Some(callback) = callback {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            warn!(?err, "change listener threw");
        }
    }
}

#[wasm_bindgen]
impl GameHandle {
    /// Game over the built-in levels.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<GameHandle, JsValue> {
        Self::with_levels(default_levels().to_vec())
    }

    /// Registers the render callback, replacing any previous one.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        *self.listener.borrow_mut() = Some(callback);
    }

    /// Presses the `index`-th operator button; returns the session state name.
    pub fn press(&self, index: usize) -> Result<String, JsValue> {
        let state = self.update(|game| game.press(index))?;
        if state == SessionState::BudgetExceeded {
            // Without a timer (no window) the level would stay locked.
            if let Err(err) = self.schedule_budget_reset() {
                warn!(?err, "budget reset not scheduled, resetting now");
                reset_exhausted(&self.game, &self.listener);
            }
        }
        Ok(state.name().to_string())
    }

    pub fn reset(&self) -> Result<(), JsValue> {
        self.update(Game::reset)
    }

    /// Moves to the next level; returns `true` once every level is solved.
    pub fn advance(&self) -> Result<bool, JsValue> {
        let advance = self.update(Game::advance)?;
        Ok(advance == Advance::Escaped)
    }

    #[wasm_bindgen(js_name = toggleSelection)]
    pub fn toggle_selection(&self, index: usize) -> Result<bool, JsValue> {
        self.update(|game| game.toggle_selection(index))
    }

    #[wasm_bindgen(js_name = confirmSelection)]
    pub fn confirm_selection(&self) -> Result<(), JsValue> {
        self.update(|game| game.confirm_selection().map(|_| ()))
    }

    pub fn reselect(&self) -> Result<(), JsValue> {
        self.update(Game::reselect)
    }

    /// Answers a combination-count level; `true` when correct.
    #[wasm_bindgen(js_name = submitCount)]
    pub fn submit_count(&self, guess: u32) -> Result<bool, JsValue> {
        self.update(|game| game.submit_combination_count(guess))
    }

    #[wasm_bindgen(getter)]
    pub fn target(&self) -> f64 {
        self.game.borrow().level().target
    }

    #[wasm_bindgen(getter)]
    pub fn total(&self) -> f64 {
        self.game.borrow().session().map_or(0.0, |s| s.total())
    }

    /// Total as shown on the display: one decimal, trailing `.0` dropped.
    #[wasm_bindgen(js_name = totalLabel)]
    pub fn total_label(&self) -> String {
        let game = self.game.borrow();
        match game.stage() {
            Stage::Escaped => "ESCAPED!".to_string(),
            _ => format_total(game.session().map_or(0.0, |s| s.total())),
        }
    }

    /// Button labels: the playing operations, or the pool while selecting.
    #[wasm_bindgen(js_name = opLabels)]
    pub fn op_labels(&self) -> Vec<String> {
        let game = self.game.borrow();
        match game.stage() {
            Stage::Playing(s) => s.presses().iter().map(|p| p.op.to_string()).collect(),
            Stage::Selecting(_) => game.level().offered_ops().iter().map(|op| op.to_string()).collect(),
            Stage::Escaped => Vec::new(),
        }
    }

    #[wasm_bindgen(js_name = pressCounts)]
    pub fn press_counts(&self) -> Vec<u32> {
        self.game
            .borrow()
            .session()
            .map(|s| s.presses().iter().map(|p| p.count).collect())
            .unwrap_or_default()
    }

    /// Pool indices chosen so far on a selection level.
    pub fn chosen(&self) -> Vec<u32> {
        match self.game.borrow().stage() {
            Stage::Selecting(sel) => sel.chosen().iter().map(|&i| i as u32).collect(),
            _ => Vec::new(),
        }
    }

    #[wasm_bindgen(js_name = pressBudget)]
    pub fn press_budget(&self) -> Option<u32> {
        self.game.borrow().session().and_then(|s| s.press_budget())
    }

    /// Solver minimum for the running round, or `undefined` when unreachable.
    #[wasm_bindgen(js_name = optimalPresses)]
    pub fn optimal_presses(&self) -> Option<u32> {
        self.game.borrow().session().and_then(|s| s.optimal_presses())
    }

    #[wasm_bindgen(getter)]
    pub fn stage(&self) -> String {
        self.game.borrow().stage().name().to_string()
    }

    /// Session state name, or `undefined` outside a round.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> Option<String> {
        self.game.borrow().session().map(|s| s.state().name().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn hint(&self) -> String {
        hint_text(&self.game.borrow())
    }

    #[wasm_bindgen(js_name = levelIndex)]
    pub fn level_index(&self) -> usize {
        self.game.borrow().level_index()
    }

    #[wasm_bindgen(js_name = levelCount)]
    pub fn level_count(&self) -> usize {
        self.game.borrow().levels().len()
    }
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
impl GameHandle {
    /// Game over a JSON level list (see [`crate::level::levels_from_json`]).
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<GameHandle, JsValue> {
        let levels = crate::level::levels_from_json(json, &EngineConfig::default()).map_err(to_js)?;
        Self::with_levels(levels)
    }
}

fn format_total(total: f64) -> String {
    // One decimal, ties away from zero; "17.0" -> "17", "-0.0" -> "0".
    let rounded = total.signum() * ((total.abs() * 10.0).round() / 10.0);
    if rounded == 0.0 { "0".to_string() } else { rounded.to_string() }
}

fn hint_text(game: &Game) -> String {
    match game.stage() {
        Stage::Escaped => "ESCAPED!".to_string(),
        Stage::Selecting(sel) => format!(
            "Bonus Challenge! Choose {} operations to reach {}",
            sel.required(),
            game.level().target
        ),
        Stage::Playing(s) => match s.state() {
            SessionState::Solved => "You did it!".to_string(),
            SessionState::BudgetExceeded => "You're out of button presses!".to_string(),
            SessionState::InProgress => match (s.mode(), s.press_budget()) {
                (LevelMode::MinimumPresses, Some(budget)) => {
                    format!("You only have {budget} button presses...")
                }
                (LevelMode::CombinationCount, _) => {
                    let labels: Vec<String> = s.presses().iter().map(|p| p.op.to_string()).collect();
                    format!("How many ways can {} reach {}?", labels.join(" and "), s.target())
                }
                _ => String::new(),
            },
        },
    }
}
