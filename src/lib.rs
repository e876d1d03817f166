//! Number Escape core crate.
//!
//! An arithmetic escape-room puzzle: every level shows a target and a few
//! operator buttons (`+3`, `-4`, ...), and the player presses them to turn 0
//! into the target. The crate holds the level-solvability engine (minimum
//! presses via BFS, two-operation combination counting), the per-level
//! session state machine and level progression. Rendering stays in the page;
//! [`web::GameHandle`] is the bridge it talks to.

use wasm_bindgen::prelude::*;

pub mod engine;
pub mod error;
pub mod game;
pub mod level;
pub mod levels;
pub mod session;
pub mod web;

pub use engine::{
    EngineConfig, OpKind, Operation, TargetMatch, count_combinations, count_pair_combinations, min_presses,
    parse_operations,
};
pub use error::{EngineError, GameError, LevelError, ParseOperationError};
pub use game::{Advance, Game, Selection, Stage};
pub use level::{Level, LevelMode, LevelOps};
pub use levels::default_levels;
pub use session::{PressCount, Session, SessionState};
pub use web::GameHandle;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Starts a game over the built-in levels.
#[wasm_bindgen]
pub fn start_game() -> Result<GameHandle, JsValue> {
    GameHandle::new()
}
