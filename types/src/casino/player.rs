use serde::{Deserialize, Serialize};

use super::RankTier;

/// Player profile and cumulative statistics
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub total_score: i64,
    pub matches_played: u32,
    /// `total_score / matches_played`, 0 before the first match.
    pub average_score: f64,
    pub rank: RankTier,
    /// Percentage of matches won (0-100).
    pub win_rate: f64,
    pub is_online: bool,
    pub profile_public: bool,
    /// Unix timestamp (milliseconds)
    pub created_at: u64,
    /// Unix timestamp (milliseconds)
    pub last_login_at: u64,
}

impl Player {
    /// A freshly registered player: no matches, Bronze.
    pub fn new(id: String, name: String, now: u64) -> Self {
        Self {
            id,
            name,
            total_score: 0,
            matches_played: 0,
            average_score: 0.0,
            rank: RankTier::Bronze,
            win_rate: 0.0,
            is_online: true,
            profile_public: true,
            created_at: now,
            last_login_at: now,
        }
    }
}
