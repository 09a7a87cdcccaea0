//! Cho-Han: bet on whether the dice total is even (cho) or odd (han).
//!
//! Wins pay 8 times the streak multiplier (x2 from a pre-roll streak of 3,
//! x3 from 5). Losses cost 4.

use super::{DiceGame, Evaluation};
use dicebattle_types::casino::{
    Bet, Outcome, CHO_HAN_DOUBLE_THRESHOLD, CHO_HAN_LOSE_SCORE, CHO_HAN_TRIPLE_THRESHOLD,
    CHO_HAN_WIN_SCORE,
};

/// Win multiplier for the streak held before the roll.
pub fn multiplier(streak: u32) -> u32 {
    if streak >= CHO_HAN_TRIPLE_THRESHOLD {
        3
    } else if streak >= CHO_HAN_DOUBLE_THRESHOLD {
        2
    } else {
        1
    }
}

/// Side of the table a total lands on.
pub fn side(total: u8) -> Bet {
    if total % 2 == 0 {
        Bet::Cho
    } else {
        Bet::Han
    }
}

pub struct ChoHan;

impl DiceGame for ChoHan {
    fn evaluate(dice: &[u8], bet: Option<Bet>, streak: u32) -> Evaluation {
        let total: u8 = dice.iter().sum();
        let side = side(total);

        if bet == Some(side) {
            let multiplier = multiplier(streak);
            Evaluation {
                outcome: Outcome::Win,
                score: CHO_HAN_WIN_SCORE * multiplier as i64,
                label: side.to_string(),
                multiplier: Some(multiplier),
            }
        } else {
            Evaluation {
                outcome: Outcome::Lose,
                score: CHO_HAN_LOSE_SCORE,
                label: side.to_string(),
                multiplier: Some(1),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_steps() {
        assert_eq!(multiplier(0), 1);
        assert_eq!(multiplier(2), 1);
        assert_eq!(multiplier(3), 2);
        assert_eq!(multiplier(4), 2);
        assert_eq!(multiplier(5), 3);
        assert_eq!(multiplier(50), 3);
    }

    #[test]
    fn test_han_win_on_streak() {
        let eval = ChoHan::evaluate(&[3, 4], Some(Bet::Han), 3);
        assert_eq!(eval.outcome, Outcome::Win);
        assert_eq!(eval.multiplier, Some(2));
        assert_eq!(eval.score, 16);
        assert_eq!(eval.label, "han");
    }

    #[test]
    fn test_score_domain() {
        for a in 1..=6u8 {
            for b in 1..=6u8 {
                for streak in 0..8 {
                    for bet in [Bet::Cho, Bet::Han] {
                        let eval = ChoHan::evaluate(&[a, b], Some(bet), streak);
                        match eval.outcome {
                            Outcome::Win => assert!([8, 16, 24].contains(&eval.score)),
                            Outcome::Lose => assert_eq!(eval.score, -4),
                            Outcome::Draw => panic!("cho-han never draws"),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_cho_loss() {
        let eval = ChoHan::evaluate(&[1, 2], Some(Bet::Cho), 6);
        assert_eq!(eval.outcome, Outcome::Lose);
        assert_eq!(eval.score, -4);
    }
}
