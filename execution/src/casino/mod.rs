//! Dice game rules.
//!
//! This module turns a roll and a bet into an outcome and score delta for:
//! - Sic Bo (big/small)
//! - Chinchirorin (self-scoring hand table)
//! - Cho-Han (even/odd, two dice)
//! - Odd-Even (three dice)

pub mod chinchirorin;
pub mod cho_han;
pub mod odd_even;
pub mod sic_bo;
mod streak;

pub use streak::StreakTracker;

use commonware_codec::Encode;
use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;
use dicebattle_types::casino::{Bet, GameType, Outcome};
use rand::{Rng, RngCore};
use thiserror::Error;
use tracing::debug;

/// Source of die faces.
///
/// Rolls never touch an ambient generator: callers inject the source, which
/// lets tests script exact dice.
pub trait DiceSource {
    /// Uniform value in [0, max). Returns 0 when `max` is 0.
    fn next_bounded(&mut self, max: u8) -> u8;

    /// Roll a single die (1-6).
    fn roll_die(&mut self) -> u8 {
        self.next_bounded(6) + 1
    }

    /// Roll multiple dice.
    fn roll_dice(&mut self, count: usize) -> Vec<u8> {
        (0..count).map(|_| self.roll_die()).collect()
    }

    /// Uniform index in [0, max). Returns 0 when `max` is 0.
    ///
    /// Bounds above `u8::MAX` are built from base-16 digits with rejection
    /// sampling.
    fn next_index(&mut self, max: usize) -> usize {
        if max <= u8::MAX as usize {
            return self.next_bounded(max as u8) as usize;
        }
        let max = max as u128;
        let mut span: u128 = 1;
        while span < max {
            span *= 16;
        }
        let limit = span - span % max;
        loop {
            let mut value: u128 = 0;
            let mut covered: u128 = 1;
            while covered < span {
                value = value * 16 + self.next_bounded(16) as u128;
                covered *= 16;
            }
            if value < limit {
                return (value % max) as usize;
            }
        }
    }

    /// Shuffle a slice in place using Fisher-Yates.
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }
}

impl<R: RngCore> DiceSource for R {
    fn next_bounded(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        self.gen_range(0..max)
    }
}

/// Roll `count` independent dice from `source`.
pub fn roll<S: DiceSource>(source: &mut S, count: usize) -> Vec<u8> {
    source.roll_dice(count)
}

/// Deterministic random number generator for replayable sessions.
///
/// Uses SHA256 hash chains seeded from a session seed, the game being played
/// and the roll number.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    /// Create a new RNG from a seed, game type, session ID, and roll number.
    pub fn new(seed: &[u8; 32], game_type: GameType, session_id: u64, roll_number: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(game_type.encode().as_ref());
        hasher.update(&session_id.to_be_bytes());
        hasher.update(&roll_number.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }

    pub fn next_u8(&mut self) -> u8 {
        self.next_byte()
    }
}

impl DiceSource for GameRng {
    fn next_bounded(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        // Rejection sampling keeps every face equally likely
        let limit = u8::MAX - (u8::MAX % max);
        loop {
            let value = self.next_u8();
            if value < limit {
                return value % max;
            }
        }
    }
}

/// Scored result of one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,
    /// Signed delta added to the player's running total.
    pub score: i64,
    /// Display label: the winning side, the triple, or the chinchirorin hand.
    pub label: String,
    /// Streak multiplier applied; only streak games report one.
    pub multiplier: Option<u32>,
}

/// Rejected roll request. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{0} requires a bet before rolling")]
    MissingBet(GameType),
    #[error("bet {bet} is not valid for {game_type}")]
    InvalidBet { game_type: GameType, bet: Bet },
    #[error("all {0} rolls of this round have been used")]
    RollLimitReached(u8),
}

/// Trait for dice game rules.
pub trait DiceGame {
    /// Score a roll. `dice` and `bet` have already been validated.
    fn evaluate(dice: &[u8], bet: Option<Bet>, streak: u32) -> Evaluation;
}

/// Check that `bet` fits `game_type`: betting games need one of their own
/// bets and chinchirorin takes none.
pub fn validate_bet(game_type: GameType, bet: Option<Bet>) -> Result<(), GameError> {
    match (game_type.requires_bet(), bet) {
        (true, None) => Err(GameError::MissingBet(game_type)),
        (_, Some(bet)) if bet.game_type() != game_type => {
            Err(GameError::InvalidBet { game_type, bet })
        }
        _ => Ok(()),
    }
}

/// Panics unless `dice` is a legal roll for `game_type`.
fn assert_roll(game_type: GameType, dice: &[u8]) {
    let count_ok = match game_type {
        GameType::SicBo | GameType::Chinchirorin => dice.len() == 3,
        GameType::ChoHan | GameType::OddEven => (2..=3).contains(&dice.len()),
    };
    assert!(count_ok, "{game_type} cannot score {} dice", dice.len());
    assert!(
        dice.iter().all(|d| (1..=6).contains(d)),
        "die face out of range: {dice:?}"
    );
}

/// Score a roll for `game_type` using the streak held before the roll.
///
/// # Panics
///
/// Panics when a die is outside 1-6 or the dice count does not fit the game.
pub fn evaluate(
    game_type: GameType,
    dice: &[u8],
    bet: Option<Bet>,
    streak: u32,
) -> Result<Evaluation, GameError> {
    validate_bet(game_type, bet)?;
    assert_roll(game_type, dice);

    let evaluation = match game_type {
        GameType::SicBo => sic_bo::SicBo::evaluate(dice, bet, streak),
        GameType::Chinchirorin => chinchirorin::Chinchirorin::evaluate(dice, bet, streak),
        GameType::ChoHan => cho_han::ChoHan::evaluate(dice, bet, streak),
        GameType::OddEven => odd_even::OddEven::evaluate(dice, bet, streak),
    };
    debug!(
        game = %game_type,
        ?dice,
        ?bet,
        streak,
        outcome = ?evaluation.outcome,
        score = evaluation.score,
        "evaluated roll"
    );
    Ok(evaluation)
}
