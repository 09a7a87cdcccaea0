use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, ReadRangeExt, Write};
use serde::{Deserialize, Serialize};

use super::{
    read_string, string_encode_size, write_string, GameType, Outcome, MAX_DICE, MAX_LABEL_LENGTH,
};

/// One resolved roll, appended to the session history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResultRecord {
    pub id: String,
    pub game_type: GameType,
    pub dice: Vec<u8>,
    /// Bet label, or the hand label for chinchirorin.
    pub bet: String,
    pub score: i64,
    /// Unix timestamp (milliseconds)
    pub timestamp: u64,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<u32>,
}

impl Write for GameResultRecord {
    fn write(&self, writer: &mut impl BufMut) {
        write_string(&self.id, writer);
        self.game_type.write(writer);
        self.dice.write(writer);
        write_string(&self.bet, writer);
        self.score.write(writer);
        self.timestamp.write(writer);
        self.outcome.write(writer);
        self.multiplier.write(writer);
    }
}

impl Read for GameResultRecord {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            id: read_string(reader, MAX_LABEL_LENGTH * 2)?,
            game_type: GameType::read(reader)?,
            dice: Vec::<u8>::read_range(reader, 0..=MAX_DICE)?,
            bet: read_string(reader, MAX_LABEL_LENGTH)?,
            score: i64::read(reader)?,
            timestamp: u64::read(reader)?,
            outcome: Outcome::read(reader)?,
            multiplier: Option::<u32>::read(reader)?,
        })
    }
}

impl EncodeSize for GameResultRecord {
    fn encode_size(&self) -> usize {
        string_encode_size(&self.id)
            + self.game_type.encode_size()
            + self.dice.encode_size()
            + string_encode_size(&self.bet)
            + self.score.encode_size()
            + self.timestamp.encode_size()
            + self.outcome.encode_size()
            + self.multiplier.encode_size()
    }
}
