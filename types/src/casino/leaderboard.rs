use serde::Serialize;

use super::{Player, RankTier};

/// Top `limit` players by average score, highest first.
///
/// The sort is stable: players with equal averages keep their relative order
/// from `players`.
pub fn top_players(players: &[Player], limit: usize) -> Vec<Player> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));
    sorted.into_iter().take(limit).cloned().collect()
}

/// Leaderboard entry
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position on the board.
    pub position: u32,
    pub player_id: String,
    pub name: String,
    pub average_score: f64,
    pub rank: RankTier,
}

/// Ranking view over the player population
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn build(players: &[Player], limit: usize) -> Self {
        let entries = top_players(players, limit)
            .into_iter()
            .enumerate()
            .map(|(i, player)| LeaderboardEntry {
                position: (i + 1) as u32,
                player_id: player.id,
                name: player.name,
                average_score: player.average_score,
                rank: player.rank,
            })
            .collect();
        Self { entries }
    }

    /// Position of a player, or `None` when they fall outside the board.
    pub fn position_of(&self, player_id: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.player_id == player_id)
            .map(|entry| entry.position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
