pub mod casino;
pub mod stats;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use casino::{evaluate, roll, DiceSource, Evaluation, GameError, GameRng, StreakTracker};
pub use stats::apply_result;
