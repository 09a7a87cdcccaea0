use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;

use super::{FAST_ROLL_DELAY_MS, SLOW_ROLL_DELAY_MS};

/// Dice games offered on the game selection screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum GameType {
    SicBo = 0,
    Chinchirorin = 1,
    ChoHan = 2,
    OddEven = 3,
}

impl GameType {
    pub const ALL: [GameType; 4] = [
        GameType::SicBo,
        GameType::Chinchirorin,
        GameType::ChoHan,
        GameType::OddEven,
    ];

    /// Number of dice thrown per roll.
    pub fn dice_count(&self) -> usize {
        match self {
            GameType::ChoHan => 2,
            GameType::SicBo | GameType::Chinchirorin | GameType::OddEven => 3,
        }
    }

    /// Whether a bet must be selected before rolling.
    pub fn requires_bet(&self) -> bool {
        !matches!(self, GameType::Chinchirorin)
    }

    /// Whether consecutive wins feed a payout multiplier.
    pub fn supports_streak(&self) -> bool {
        matches!(self, GameType::SicBo | GameType::ChoHan)
    }

    /// Length of the rolling animation before the outcome is revealed.
    pub fn roll_delay(&self) -> Duration {
        match self {
            GameType::SicBo | GameType::Chinchirorin => Duration::from_millis(SLOW_ROLL_DELAY_MS),
            GameType::ChoHan | GameType::OddEven => Duration::from_millis(FAST_ROLL_DELAY_MS),
        }
    }

    /// Bets that can be placed on this game (empty for self-scoring games).
    pub fn bets(&self) -> &'static [Bet] {
        match self {
            GameType::SicBo => &[Bet::Big, Bet::Small],
            GameType::ChoHan => &[Bet::Cho, Bet::Han],
            GameType::OddEven => &[Bet::Odd, Bet::Even],
            GameType::Chinchirorin => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::SicBo => "sicbo",
            GameType::Chinchirorin => "chinchirorin",
            GameType::ChoHan => "chohan",
            GameType::OddEven => "oddeven",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a game or bet label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown game type: {0}")]
    UnknownGame(String),
    #[error("unknown bet: {0}")]
    UnknownBet(String),
}

impl FromStr for GameType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sicbo" | "sic-bo" => Ok(GameType::SicBo),
            "chinchirorin" => Ok(GameType::Chinchirorin),
            "chohan" | "cho-han" => Ok(GameType::ChoHan),
            "oddeven" | "odd-even" => Ok(GameType::OddEven),
            _ => Err(ParseError::UnknownGame(s.to_string())),
        }
    }
}

impl Write for GameType {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for GameType {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        match value {
            0 => Ok(Self::SicBo),
            1 => Ok(Self::Chinchirorin),
            2 => Ok(Self::ChoHan),
            3 => Ok(Self::OddEven),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for GameType {
    const SIZE: usize = 1;
}

/// A prediction placed before rolling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Bet {
    Big = 0,   // Sic Bo total 11-17
    Small = 1, // Sic Bo total 4-10
    Cho = 2,   // Cho-Han even total
    Han = 3,   // Cho-Han odd total
    Odd = 4,
    Even = 5,
}

impl Bet {
    /// Game this bet belongs to.
    pub fn game_type(&self) -> GameType {
        match self {
            Bet::Big | Bet::Small => GameType::SicBo,
            Bet::Cho | Bet::Han => GameType::ChoHan,
            Bet::Odd | Bet::Even => GameType::OddEven,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bet::Big => "big",
            Bet::Small => "small",
            Bet::Cho => "cho",
            Bet::Han => "han",
            Bet::Odd => "odd",
            Bet::Even => "even",
        }
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "big" => Ok(Bet::Big),
            "small" => Ok(Bet::Small),
            "cho" => Ok(Bet::Cho),
            "han" => Ok(Bet::Han),
            "odd" => Ok(Bet::Odd),
            "even" => Ok(Bet::Even),
            _ => Err(ParseError::UnknownBet(s.to_string())),
        }
    }
}

/// Result of a single roll from the player's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Outcome {
    Win = 0,
    Lose = 1,
    /// Only produced by a Sic Bo triple.
    Draw = 2,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Win)
    }
}

impl Write for Outcome {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Outcome {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        match u8::read(reader)? {
            0 => Ok(Self::Win),
            1 => Ok(Self::Lose),
            2 => Ok(Self::Draw),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for Outcome {
    const SIZE: usize = 1;
}
