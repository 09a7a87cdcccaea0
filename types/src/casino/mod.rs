mod battle;
mod codec;
mod constants;
mod game;
mod leaderboard;
mod player;
mod rank;
mod record;

pub use battle::*;
pub use codec::{read_string, string_encode_size, write_string};
pub use constants::*;
pub use game::*;
pub use leaderboard::*;
pub use player::*;
pub use rank::*;
pub use record::*;
