use dicebattle_types::casino::{GameType, Outcome};

/// Consecutive wins within one game session.
///
/// The count is read before scoring (it picks the multiplier) and updated
/// after. It lives with the game screen, not the player record, and starts
/// over with every new session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreakTracker {
    count: u32,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u32 {
        self.count
    }

    /// Fold an outcome into the streak. A win extends it; a loss or a draw
    /// resets it. Games without streak bonuses leave it untouched.
    pub fn record(&mut self, game_type: GameType, outcome: Outcome) {
        if !game_type.supports_streak() {
            return;
        }
        match outcome {
            Outcome::Win => self.count = self.count.saturating_add(1),
            Outcome::Lose | Outcome::Draw => self.count = 0,
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}
