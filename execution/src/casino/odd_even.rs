//! Odd-Even: three dice, bet on the parity of the total. No streak bonus.

use super::{DiceGame, Evaluation};
use dicebattle_types::casino::{Bet, Outcome, ODD_EVEN_LOSE_SCORE, ODD_EVEN_WIN_SCORE};

pub struct OddEven;

impl DiceGame for OddEven {
    fn evaluate(dice: &[u8], bet: Option<Bet>, _streak: u32) -> Evaluation {
        let total: u8 = dice.iter().sum();
        let side = if total % 2 == 1 { Bet::Odd } else { Bet::Even };

        let (outcome, score) = if bet == Some(side) {
            (Outcome::Win, ODD_EVEN_WIN_SCORE)
        } else {
            (Outcome::Lose, ODD_EVEN_LOSE_SCORE)
        };
        Evaluation {
            outcome,
            score,
            label: side.to_string(),
            multiplier: None,
        }
    }
}
