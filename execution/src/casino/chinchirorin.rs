//! Chinchirorin: three dice scored against a fixed hand table, no bet.
//!
//! Hands, highest priority first:
//! - Pinzoro (1-1-1): +50
//! - Any other triple: +30
//! - 1-2-3 and 4-5-6 straights: +25
//! - One pair: the odd die times 3
//! - Anything else: -5
//!
//! A round allows three rolls.

use super::{DiceGame, Evaluation, GameError};
use dicebattle_types::casino::{
    Bet, Outcome, CHINCHIRORIN_MAX_ROLLS, NO_HAND_SCORE, PAIR_FACTOR, PINZORO_SCORE,
    STRAIGHT_SCORE, TRIPLE_SCORE,
};

/// A scored chinchirorin hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    /// Triple ones.
    Pinzoro,
    Triple(u8),
    /// 1-2-3
    LowStraight,
    /// 4-5-6
    HighStraight,
    Pair { pair: u8, single: u8 },
    NoHand,
}

impl Hand {
    /// Classify three dice.
    pub fn of(dice: [u8; 3]) -> Self {
        let mut sorted = dice;
        sorted.sort_unstable();

        if sorted[0] == sorted[2] {
            return if sorted[0] == 1 {
                Hand::Pinzoro
            } else {
                Hand::Triple(sorted[0])
            };
        }
        match sorted {
            [1, 2, 3] => return Hand::LowStraight,
            [4, 5, 6] => return Hand::HighStraight,
            _ => {}
        }
        // Sorted and not a triple: a pair sits at the front or the back
        if sorted[0] == sorted[1] {
            Hand::Pair {
                pair: sorted[0],
                single: sorted[2],
            }
        } else if sorted[1] == sorted[2] {
            Hand::Pair {
                pair: sorted[1],
                single: sorted[0],
            }
        } else {
            Hand::NoHand
        }
    }

    pub fn score(&self) -> i64 {
        match self {
            Hand::Pinzoro => PINZORO_SCORE,
            Hand::Triple(_) => TRIPLE_SCORE,
            Hand::LowStraight | Hand::HighStraight => STRAIGHT_SCORE,
            Hand::Pair { single, .. } => *single as i64 * PAIR_FACTOR,
            Hand::NoHand => NO_HAND_SCORE,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Hand::Pinzoro => "double-one-triple".to_string(),
            Hand::Triple(value) => format!("triple-{value}"),
            Hand::LowStraight => "low-straight".to_string(),
            Hand::HighStraight => "high-straight".to_string(),
            Hand::Pair { pair, .. } => format!("pair-of-{pair}"),
            Hand::NoHand => "no-hand".to_string(),
        }
    }
}

pub struct Chinchirorin;

impl DiceGame for Chinchirorin {
    fn evaluate(dice: &[u8], _bet: Option<Bet>, _streak: u32) -> Evaluation {
        let hand = Hand::of([dice[0], dice[1], dice[2]]);
        let score = hand.score();
        Evaluation {
            // No-hand is a loss, never a draw
            outcome: if score > 0 { Outcome::Win } else { Outcome::Lose },
            score,
            label: hand.label(),
            multiplier: None,
        }
    }
}

/// Roll budget and best hand for one chinchirorin round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Round {
    rolls_taken: u8,
    best: Option<Hand>,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails once every roll is used. Never mutates the round.
    pub fn ensure_can_roll(&self) -> Result<(), GameError> {
        if self.rolls_taken >= CHINCHIRORIN_MAX_ROLLS {
            return Err(GameError::RollLimitReached(CHINCHIRORIN_MAX_ROLLS));
        }
        Ok(())
    }

    /// Count a roll and keep the highest scoring hand (ties keep the earlier one).
    pub fn record(&mut self, hand: Hand) -> Result<(), GameError> {
        self.ensure_can_roll()?;
        self.rolls_taken += 1;
        if self.best.map_or(true, |best| hand.score() > best.score()) {
            self.best = Some(hand);
        }
        Ok(())
    }

    pub fn rolls_taken(&self) -> u8 {
        self.rolls_taken
    }

    pub fn remaining(&self) -> u8 {
        CHINCHIRORIN_MAX_ROLLS - self.rolls_taken
    }

    pub fn is_complete(&self) -> bool {
        self.rolls_taken >= CHINCHIRORIN_MAX_ROLLS
    }

    pub fn best(&self) -> Option<Hand> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinzoro_beats_pair_rule() {
        let eval = Chinchirorin::evaluate(&[1, 1, 1], None, 0);
        assert_eq!(eval.label, "double-one-triple");
        assert_eq!(eval.score, 50);
        assert_eq!(eval.outcome, Outcome::Win);
    }

    #[test]
    fn test_other_triples() {
        for v in 2..=6u8 {
            let eval = Chinchirorin::evaluate(&[v, v, v], None, 0);
            assert_eq!(eval.label, format!("triple-{v}"));
            assert_eq!(eval.score, 30);
        }
    }

    #[test]
    fn test_straights_any_order() {
        let eval = Chinchirorin::evaluate(&[3, 1, 2], None, 0);
        assert_eq!(eval.label, "low-straight");
        assert_eq!(eval.score, 25);

        let eval = Chinchirorin::evaluate(&[6, 4, 5], None, 0);
        assert_eq!(eval.label, "high-straight");
        assert_eq!(eval.score, 25);
    }

    #[test]
    fn test_pair_scores_single() {
        let eval = Chinchirorin::evaluate(&[2, 2, 5], None, 0);
        assert_eq!(eval.label, "pair-of-2");
        assert_eq!(eval.score, 15);
        assert_eq!(eval.outcome, Outcome::Win);

        let eval = Chinchirorin::evaluate(&[6, 1, 6], None, 0);
        assert_eq!(eval.label, "pair-of-6");
        assert_eq!(eval.score, 3);
    }

    #[test]
    fn test_no_hand_is_loss() {
        let eval = Chinchirorin::evaluate(&[1, 3, 5], None, 0);
        assert_eq!(eval.label, "no-hand");
        assert_eq!(eval.score, -5);
        assert_eq!(eval.outcome, Outcome::Lose);
    }

    #[test]
    fn test_never_draws() {
        for a in 1..=6u8 {
            for b in 1..=6u8 {
                for c in 1..=6u8 {
                    let eval = Chinchirorin::evaluate(&[a, b, c], None, 0);
                    assert_ne!(eval.outcome, Outcome::Draw);
                }
            }
        }
    }

    #[test]
    fn test_round_cap() {
        let mut round = Round::new();
        for _ in 0..3 {
            assert!(round.ensure_can_roll().is_ok());
            round.record(Hand::NoHand).unwrap();
        }
        assert!(round.is_complete());
        assert_eq!(round.rolls_taken(), 3);
        assert_eq!(round.remaining(), 0);

        let before = round.clone();
        assert_eq!(
            round.record(Hand::Pinzoro),
            Err(GameError::RollLimitReached(3))
        );
        assert_eq!(round, before);
    }

    #[test]
    fn test_round_keeps_best_hand() {
        let mut round = Round::new();
        round.record(Hand::Pair { pair: 2, single: 1 }).unwrap();
        round.record(Hand::Triple(4)).unwrap();
        round.record(Hand::Pair { pair: 3, single: 6 }).unwrap();
        assert_eq!(round.best(), Some(Hand::Triple(4)));
    }

    #[test]
    fn test_round_best_tie_keeps_first() {
        let mut round = Round::new();
        round.record(Hand::LowStraight).unwrap();
        round.record(Hand::HighStraight).unwrap();
        assert_eq!(round.best(), Some(Hand::LowStraight));
    }
}
