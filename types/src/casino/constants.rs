/// Minimum display name length after trimming
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum display name length
pub const MAX_NAME_LENGTH: usize = 20;

/// Default number of players shown on the ranking screen
pub const LEADERBOARD_DEFAULT_LIMIT: usize = 100;

/// Rolls allowed per chinchirorin round
pub const CHINCHIRORIN_MAX_ROLLS: u8 = 3;

/// Rounds played before a battle completes
pub const BATTLE_MAX_ROUNDS: u32 = 5;

/// Maximum participants in a battle (current player included)
pub const BATTLE_MAX_PLAYERS: usize = 10;

/// Opponents picked by a random match
pub const RANDOM_MATCH_OPPONENTS: usize = 3;

/// Maximum dice accepted when decoding a record
pub const MAX_DICE: usize = 3;

/// Maximum label length accepted when decoding a record
pub const MAX_LABEL_LENGTH: usize = 32;

// Sic Bo scoring
pub const SIC_BO_WIN_SCORE: i64 = 10;
pub const SIC_BO_LOSE_SCORE: i64 = -5;
/// Pre-roll streak at which Sic Bo wins pay double
pub const SIC_BO_STREAK_THRESHOLD: u32 = 3;

// Cho-Han scoring
pub const CHO_HAN_WIN_SCORE: i64 = 8;
pub const CHO_HAN_LOSE_SCORE: i64 = -4;
/// Pre-roll streak at which Cho-Han wins pay double
pub const CHO_HAN_DOUBLE_THRESHOLD: u32 = 3;
/// Pre-roll streak at which Cho-Han wins pay triple
pub const CHO_HAN_TRIPLE_THRESHOLD: u32 = 5;

// Odd-Even scoring
pub const ODD_EVEN_WIN_SCORE: i64 = 8;
pub const ODD_EVEN_LOSE_SCORE: i64 = -4;

// Chinchirorin hand table
pub const PINZORO_SCORE: i64 = 50;
pub const TRIPLE_SCORE: i64 = 30;
pub const STRAIGHT_SCORE: i64 = 25;
/// Pair hands score the odd die times this factor
pub const PAIR_FACTOR: i64 = 3;
pub const NO_HAND_SCORE: i64 = -5;

/// Roll animation window for Sic Bo and Chinchirorin (milliseconds)
pub const SLOW_ROLL_DELAY_MS: u64 = 2_000;

/// Roll animation window for Cho-Han and Odd-Even (milliseconds)
pub const FAST_ROLL_DELAY_MS: u64 = 1_500;
