// Integration tests (native) for the `number-escape` crate.
// These tests drive the game through its public Rust API only; nothing here
// touches wasm or browser APIs so they run under `cargo test` on the host.

use number_escape::{
    Advance, EngineConfig, Game, GameError, Level, LevelMode, SessionState, Stage, default_levels, parse_operations,
};

fn press_n(game: &mut Game, index: usize, n: usize) {
    for _ in 0..n {
        game.press(index).unwrap();
    }
}

fn solved(game: &Game) -> bool {
    game.session().is_some_and(|s| s.is_solved())
}

#[test]
fn default_levels_can_be_played_to_the_end() {
    let mut game = Game::new(default_levels().to_vec(), EngineConfig::default()).unwrap();

    // 50 = 7*5 + 3*5
    press_n(&mut game, 1, 5);
    press_n(&mut game, 0, 5);
    assert!(solved(&game));
    assert_eq!(game.advance().unwrap(), Advance::Level(1));

    // 65 = 3*3 + 7*8
    press_n(&mut game, 0, 3);
    press_n(&mut game, 1, 8);
    assert!(solved(&game));
    game.advance().unwrap();

    // 101 within the 15-press budget
    assert_eq!(game.session().unwrap().press_budget(), Some(15));
    press_n(&mut game, 0, 1);
    press_n(&mut game, 1, 14);
    assert!(solved(&game));
    game.advance().unwrap();

    // 60 = 9*8 - 4*3
    press_n(&mut game, 1, 8);
    press_n(&mut game, 0, 3);
    assert!(solved(&game));
    game.advance().unwrap();

    // 119 within the 19-press budget
    assert_eq!(game.session().unwrap().press_budget(), Some(19));
    press_n(&mut game, 1, 15);
    press_n(&mut game, 0, 4);
    assert!(solved(&game));
    game.advance().unwrap();

    // 70 = 4*22 - 9*2
    press_n(&mut game, 1, 22);
    press_n(&mut game, 0, 2);
    assert!(solved(&game));
    game.advance().unwrap();

    // 50 = 3.9*6 + 1.4*19
    press_n(&mut game, 0, 6);
    press_n(&mut game, 1, 19);
    assert!(solved(&game));
    game.advance().unwrap();

    // How many ways do +6 and -5 reach 17?
    assert!(game.submit_combination_count(16).unwrap());
    game.advance().unwrap();

    // Bonus: pick +6 and -5 from the pool
    assert!(matches!(game.stage(), Stage::Selecting(_)));
    game.toggle_selection(1).unwrap();
    game.toggle_selection(3).unwrap();
    game.confirm_selection().unwrap();
    press_n(&mut game, 0, 7);
    press_n(&mut game, 1, 5);
    assert!(solved(&game));
    assert_eq!(game.advance().unwrap(), Advance::Escaped);
}

#[test]
fn budget_level_locks_until_deferred_reset() {
    let levels = vec![Level::fixed(
        119.0,
        parse_operations(&["-4", "+9"]).unwrap(),
        LevelMode::MinimumPresses,
    )];
    let mut game = Game::new(levels, EngineConfig::default()).unwrap();
    press_n(&mut game, 1, 19);
    assert_eq!(game.press(1).unwrap(), SessionState::BudgetExceeded);
    assert!(matches!(game.press(0), Err(GameError::Locked(_))));

    // Manual reset first, then the timer fires.
    game.reset().unwrap();
    assert!(!game.reset_if_exhausted());
    assert_eq!(game.session().unwrap().state(), SessionState::InProgress);
    game.press(1).unwrap();
    assert_eq!(game.session().unwrap().total(), 9.0);
}

#[test]
fn unsolvable_selection_reports_no_optimal_path() {
    let levels = vec![Level::selection(
        17.0,
        parse_operations(&["+10", "+6", "-4", "-5"]).unwrap(),
        2,
    )];
    let mut game = Game::new(levels, EngineConfig::default()).unwrap();
    game.toggle_selection(0).unwrap();
    game.toggle_selection(1).unwrap();
    let session = game.confirm_selection().unwrap();
    // 10x + 6y is always even.
    assert_eq!(session.optimal_presses(), None);

    game.reselect().unwrap();
    game.toggle_selection(1).unwrap();
    game.toggle_selection(3).unwrap();
    assert_eq!(game.confirm_selection().unwrap().optimal_presses(), Some(12));
}

#[test]
fn invalid_level_list_is_rejected() {
    let levels = vec![Level::fixed(
        17.0,
        parse_operations(&["+10", "+6", "-4"]).unwrap(),
        LevelMode::CombinationCount,
    )];
    assert!(matches!(
        Game::new(levels, EngineConfig::default()),
        Err(GameError::Level(_))
    ));
}

#[cfg(feature = "serde_json")]
#[test]
fn json_levels_drive_a_game() {
    let json = r#"[
        { "target": 10, "ops": ["+3", "+7"], "mode": "minimum_presses" },
        { "target": 8, "ops": ["+1", "*2"] }
    ]"#;
    let levels = number_escape::level::levels_from_json(json, &EngineConfig::default()).unwrap();
    let mut game = Game::new(levels, EngineConfig::default()).unwrap();
    assert_eq!(game.session().unwrap().press_budget(), Some(2));
    game.press(0).unwrap();
    game.press(1).unwrap();
    game.advance().unwrap();

    game.press(0).unwrap();
    game.press(1).unwrap();
    game.press(1).unwrap();
    assert_eq!(game.press(1).unwrap(), SessionState::Solved);
}
