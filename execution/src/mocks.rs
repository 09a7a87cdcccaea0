use crate::casino::DiceSource;
use dicebattle_types::casino::{GameResultRecord, GameType, Outcome, Player, RankTier};
use std::collections::VecDeque;

/// Replays a fixed sequence of die faces, then repeats the last one.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
    last: u8,
}

impl ScriptedDice {
    pub fn new(faces: &[u8]) -> Self {
        assert!(
            faces.iter().all(|f| (1..=6).contains(f)),
            "scripted face out of range: {faces:?}"
        );
        Self {
            faces: faces.iter().copied().collect(),
            last: faces.last().copied().unwrap_or(1),
        }
    }

    /// Faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn next_bounded(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        (self.roll_die() - 1) % max
    }

    fn roll_die(&mut self) -> u8 {
        if let Some(face) = self.faces.pop_front() {
            self.last = face;
        }
        self.last
    }
}

/// Creates a player with the given totals and derived fields filled in.
pub fn create_player(id: &str, total_score: i64, matches_played: u32) -> Player {
    let mut player = Player::new(id.to_string(), format!("Player {id}"), 0);
    player.total_score = total_score;
    player.matches_played = matches_played;
    player.average_score = crate::stats::average_score(total_score, matches_played);
    player.rank = RankTier::from_average(player.average_score);
    player
}

/// Creates a result record for a pre-scored roll.
pub fn create_record(
    game_type: GameType,
    dice: &[u8],
    score: i64,
    outcome: Outcome,
) -> GameResultRecord {
    GameResultRecord {
        id: format!("{game_type}-{score}"),
        game_type,
        dice: dice.to_vec(),
        bet: String::new(),
        score,
        timestamp: 0,
        outcome,
        multiplier: None,
    }
}
