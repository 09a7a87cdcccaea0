//! Sic Bo big/small.
//!
//! Three dice. Big is a total of 11-17, small 4-10. A triple is a draw
//! regardless of the bet. Totals of 3 and 18 can only come from a triple, so
//! big and small cover every other roll.
//!
//! Wins pay 10, doubled once the pre-roll streak reaches 3. Losses cost 5.

use super::{DiceGame, Evaluation};
use dicebattle_types::casino::{
    Bet, Outcome, SIC_BO_LOSE_SCORE, SIC_BO_STREAK_THRESHOLD, SIC_BO_WIN_SCORE,
};

/// Check if dice form a triple (all same).
pub fn is_triple(dice: &[u8]) -> bool {
    dice.windows(2).all(|w| w[0] == w[1])
}

pub fn is_big(total: u8) -> bool {
    (11..=17).contains(&total)
}

pub fn is_small(total: u8) -> bool {
    (4..=10).contains(&total)
}

/// Win multiplier for the streak held before the roll.
pub fn multiplier(streak: u32) -> u32 {
    if streak >= SIC_BO_STREAK_THRESHOLD {
        2
    } else {
        1
    }
}

pub struct SicBo;

impl DiceGame for SicBo {
    fn evaluate(dice: &[u8], bet: Option<Bet>, streak: u32) -> Evaluation {
        let total: u8 = dice.iter().sum();

        if is_triple(dice) {
            return Evaluation {
                outcome: Outcome::Draw,
                score: 0,
                label: format!("triple-{}", dice[0]),
                multiplier: Some(1),
            };
        }

        let side = if is_big(total) { Bet::Big } else { Bet::Small };
        if bet == Some(side) {
            let multiplier = multiplier(streak);
            Evaluation {
                outcome: Outcome::Win,
                score: SIC_BO_WIN_SCORE * multiplier as i64,
                label: side.to_string(),
                multiplier: Some(multiplier),
            }
        } else {
            Evaluation {
                outcome: Outcome::Lose,
                score: SIC_BO_LOSE_SCORE,
                label: side.to_string(),
                multiplier: Some(1),
            }
        }
    }
}
