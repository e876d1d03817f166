// Built-in level list.
// Each entry mirrors a button layout of the escape room; later levels reuse the
// same buttons with a press budget.

use std::sync::OnceLock;

use crate::engine::Operation;
use crate::level::{Level, LevelMode};

fn build_levels() -> Vec<Level> {
    use LevelMode::*;
    let (p3, p7) = (Operation::add(3.0), Operation::add(7.0));
    let (m4, p9) = (Operation::sub(4.0), Operation::add(9.0));
    vec![
        Level::fixed(50.0, vec![p3, p7], FreePlay),
        Level::fixed(65.0, vec![p3, p7], FreePlay),
        Level::fixed(101.0, vec![p3, p7], MinimumPresses),
        Level::fixed(60.0, vec![m4, p9], FreePlay),
        Level::fixed(119.0, vec![m4, p9], MinimumPresses),
        Level::fixed(70.0, vec![Operation::sub(9.0), Operation::add(4.0)], FreePlay),
        Level::fixed(50.0, vec![Operation::add(3.9), Operation::add(1.4)], FreePlay),
        Level::fixed(17.0, vec![Operation::add(6.0), Operation::sub(5.0)], CombinationCount),
        // Bonus challenge
        Level::selection(
            17.0,
            vec![
                Operation::add(10.0),
                Operation::add(6.0),
                Operation::sub(4.0),
                Operation::sub(5.0),
            ],
            2,
        ),
    ]
}

/// The shipped level list, built once.
pub fn default_levels() -> &'static [Level] {
    static LEVELS: OnceLock<Vec<Level>> = OnceLock::new();
    LEVELS.get_or_init(build_levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineConfig, min_presses};
    use crate::level::validate_levels;

    #[test]
    fn test_default_levels_are_valid() {
        assert!(validate_levels(default_levels(), &EngineConfig::default()).is_ok());
    }

    #[test]
    fn test_budget_levels_are_solvable() {
        let cfg = EngineConfig::default();
        for level in default_levels().iter().filter(|l| l.mode == LevelMode::MinimumPresses) {
            assert!(
                min_presses(level.target, level.offered_ops(), &cfg).is_some(),
                "budget level with target {} has no solution",
                level.target
            );
        }
    }

    #[test]
    fn test_every_fixed_level_is_reachable() {
        let cfg = EngineConfig::default();
        for level in default_levels().iter().filter(|l| !l.requires_selection()) {
            assert!(min_presses(level.target, level.offered_ops(), &cfg).is_some());
        }
    }

    #[test]
    fn test_last_level_is_the_selection_bonus() {
        let last = default_levels().last().unwrap();
        assert!(last.requires_selection());
        assert_eq!(last.target, 17.0);
    }
}
