//! Player statistics aggregation.

use dicebattle_types::casino::{GameResultRecord, Outcome, Player, RankTier};

/// Average score per match, 0 when no matches were played.
pub fn average_score(total_score: i64, matches_played: u32) -> f64 {
    if matches_played == 0 {
        return 0.0;
    }
    total_score as f64 / matches_played as f64
}

/// Win percentage (0-100), 0 when no matches were played.
pub fn win_rate(wins: u32, matches_played: u32) -> f64 {
    if matches_played == 0 {
        return 0.0;
    }
    wins as f64 / matches_played as f64 * 100.0
}

/// Fold one result into a player's totals.
///
/// `history` holds the results recorded before `result`; its wins seed the new
/// win rate. Returns the updated player with every derived field recomputed;
/// the input is left untouched.
pub fn apply_result(
    player: &Player,
    result: &GameResultRecord,
    history: &[GameResultRecord],
) -> Player {
    let total_score = player.total_score + result.score;
    let matches_played = player.matches_played + 1;
    let average_score = average_score(total_score, matches_played);

    let prior_wins = history
        .iter()
        .filter(|record| record.outcome == Outcome::Win)
        .count() as u32;
    let wins = prior_wins + u32::from(result.outcome.is_win());

    Player {
        total_score,
        matches_played,
        average_score,
        rank: RankTier::from_average(average_score),
        win_rate: win_rate(wins, matches_played),
        last_login_at: result.timestamp,
        ..player.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicebattle_types::casino::GameType;

    fn result(score: i64, outcome: Outcome) -> GameResultRecord {
        GameResultRecord {
            id: "r".to_string(),
            game_type: GameType::ChoHan,
            dice: vec![3, 5],
            bet: "cho".to_string(),
            score,
            timestamp: 99,
            outcome,
            multiplier: Some(1),
        }
    }

    #[test]
    fn test_zero_matches_is_zero() {
        assert_eq!(average_score(0, 0), 0.0);
        assert_eq!(average_score(-40, 0), 0.0);
        assert_eq!(win_rate(0, 0), 0.0);
    }

    #[test]
    fn test_chohan_win_promotes_to_silver() {
        let mut player = Player::new("p".to_string(), "P".to_string(), 0);
        player.total_score = 100;
        player.matches_played = 2;

        let updated = apply_result(&player, &result(8, Outcome::Win), &[]);
        assert_eq!(updated.total_score, 108);
        assert_eq!(updated.matches_played, 3);
        assert_eq!(updated.average_score, 36.0);
        assert_eq!(updated.rank, RankTier::Silver);
        assert_eq!(updated.last_login_at, 99);
        // The input is not mutated
        assert_eq!(player.total_score, 100);
    }

    #[test]
    fn test_win_rate_counts_prior_history() {
        let player = Player {
            matches_played: 3,
            total_score: 12,
            ..Player::new("p".to_string(), "P".to_string(), 0)
        };
        let history = vec![
            result(8, Outcome::Win),
            result(-4, Outcome::Lose),
            result(8, Outcome::Win),
        ];

        let updated = apply_result(&player, &result(-4, Outcome::Lose), &history);
        assert_eq!(updated.matches_played, 4);
        assert_eq!(updated.win_rate, 50.0);

        let updated = apply_result(&player, &result(8, Outcome::Win), &history);
        assert_eq!(updated.win_rate, 75.0);
    }

    #[test]
    fn test_draw_counts_as_match_not_win() {
        let player = Player::new("p".to_string(), "P".to_string(), 0);
        let updated = apply_result(&player, &result(0, Outcome::Draw), &[]);
        assert_eq!(updated.matches_played, 1);
        assert_eq!(updated.win_rate, 0.0);
        assert_eq!(updated.average_score, 0.0);
        assert_eq!(updated.rank, RankTier::Bronze);
    }

    #[test]
    fn test_negative_average_stays_bronze() {
        let player = Player::new("p".to_string(), "P".to_string(), 0);
        let updated = apply_result(&player, &result(-5, Outcome::Lose), &[]);
        assert_eq!(updated.average_score, -5.0);
        assert_eq!(updated.rank, RankTier::Bronze);
    }
}
