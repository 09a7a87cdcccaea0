use commonware_utils::from_hex_formatted;
use dicebattle_types::casino::{GameType, LEADERBOARD_DEFAULT_LIMIT};
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::Level;

/// Configuration for the headless player, read from YAML.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: usize,
    #[serde(default)]
    pub roll_delays: RollDelays,
    /// Optional 32-byte hex seed; rolls are drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<String>,
}

/// Roll animation windows in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RollDelays {
    pub sicbo: u64,
    pub chinchirorin: u64,
    pub chohan: u64,
    pub oddeven: u64,
}

impl Default for RollDelays {
    fn default() -> Self {
        let ms = |game: GameType| game.roll_delay().as_millis() as u64;
        Self {
            sicbo: ms(GameType::SicBo),
            chinchirorin: ms(GameType::Chinchirorin),
            chohan: ms(GameType::ChoHan),
            oddeven: ms(GameType::OddEven),
        }
    }
}

impl RollDelays {
    pub fn delay(&self, game_type: GameType) -> Duration {
        let ms = match game_type {
            GameType::SicBo => self.sicbo,
            GameType::Chinchirorin => self.chinchirorin,
            GameType::ChoHan => self.chohan,
            GameType::OddEven => self.oddeven,
        };
        Duration::from_millis(ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            leaderboard_limit: default_leaderboard_limit(),
            roll_delays: RollDelays::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be hex: {value}")]
    InvalidHex { field: &'static str, value: String },
    #[error("{field} must be 32 bytes (got {len})")]
    InvalidSeedLength { field: &'static str, len: usize },
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: usize },
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub log_level: Level,
    pub leaderboard_limit: usize,
    pub roll_delays: RollDelays,
    pub seed: Option<[u8; 32]>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_leaderboard_limit() -> usize {
    LEADERBOARD_DEFAULT_LIMIT
}

fn parse_seed(field: &'static str, value: &str) -> Result<[u8; 32], ConfigError> {
    let bytes = from_hex_formatted(value).ok_or_else(|| ConfigError::InvalidHex {
        field,
        value: value.to_string(),
    })?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| ConfigError::InvalidSeedLength { field, len })
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.leaderboard_limit == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "leaderboard_limit",
                value: self.leaderboard_limit,
            });
        }

        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        let seed = self
            .seed
            .as_deref()
            .map(|seed| parse_seed("seed", seed))
            .transpose()?;

        Ok(ValidatedConfig {
            log_level,
            leaderboard_limit: self.leaderboard_limit,
            roll_delays: self.roll_delays,
            seed,
        })
    }
}
