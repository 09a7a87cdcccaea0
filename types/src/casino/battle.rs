use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{GameResultRecord, GameType, BATTLE_MAX_ROUNDS};

/// Battle lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleStatus {
    #[default]
    Waiting,
    Active,
    Completed,
    Cancelled,
}

impl BattleStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, BattleStatus::Completed | BattleStatus::Cancelled)
    }
}

/// A match between the current player and one or more opponents
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    pub id: String,
    pub players: Vec<String>,
    pub game_type: GameType,
    pub status: BattleStatus,
    pub current_round: u32,
    pub max_rounds: u32,
    pub results: BTreeMap<String, Vec<GameResultRecord>>,
    pub winner: Option<String>,
    /// Unix timestamp (milliseconds)
    pub created_at: u64,
    pub started_at: Option<u64>,
    pub completed_at: Option<u64>,
}

impl Battle {
    pub fn new(id: String, players: Vec<String>, game_type: GameType, now: u64) -> Self {
        Self {
            id,
            players,
            game_type,
            status: BattleStatus::Waiting,
            current_round: 1,
            max_rounds: BATTLE_MAX_ROUNDS,
            results: BTreeMap::new(),
            winner: None,
            created_at: now,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn contains_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    /// Rounds a player has finished so far.
    pub fn rounds_played(&self, player: &str) -> u32 {
        self.results.get(player).map_or(0, |r| r.len() as u32)
    }

    /// Summed score of a player across recorded rounds.
    pub fn total_score(&self, player: &str) -> i64 {
        self.results
            .get(player)
            .map_or(0, |r| r.iter().map(|record| record.score).sum())
    }

    /// Record a player's roll for the current round.
    ///
    /// Returns false (and records nothing) when the battle is finished, the
    /// player is not a participant, the roll is from another game, or the
    /// player already rolled this round.
    /// The first recorded roll starts the battle; the round advances once every
    /// participant has rolled, and the battle completes after `max_rounds`.
    pub fn record(&mut self, player: &str, result: GameResultRecord, now: u64) -> bool {
        if self.status.is_finished() || !self.contains_player(player) {
            return false;
        }
        if result.game_type != self.game_type {
            return false;
        }
        if self.rounds_played(player) >= self.current_round {
            return false;
        }
        if self.status == BattleStatus::Waiting {
            self.status = BattleStatus::Active;
            self.started_at = Some(now);
        }
        self.results
            .entry(player.to_string())
            .or_default()
            .push(result);

        let round_done = self
            .players
            .iter()
            .all(|p| self.rounds_played(p) >= self.current_round);
        if round_done {
            if self.current_round >= self.max_rounds {
                self.complete(now);
            } else {
                self.current_round += 1;
            }
        }
        true
    }

    /// Highest summed score; ties go to the earlier participant.
    pub fn leader(&self) -> Option<&str> {
        let mut best: Option<(&str, i64)> = None;
        for player in &self.players {
            let score = self.total_score(player);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((player, score));
            }
        }
        best.map(|(player, _)| player)
    }

    fn complete(&mut self, now: u64) {
        self.status = BattleStatus::Completed;
        self.completed_at = Some(now);
        self.winner = self.leader().map(str::to_string);
    }

    pub fn cancel(&mut self, now: u64) -> bool {
        if self.status.is_finished() {
            return false;
        }
        self.status = BattleStatus::Cancelled;
        self.completed_at = Some(now);
        true
    }
}
