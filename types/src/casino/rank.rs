use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank bands derived from a player's average score, lowest first
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum RankTier {
    #[default]
    Bronze = 0,
    Silver = 1,
    Gold = 2,
    Platinum = 3,
    Diamond = 4,
    Master = 5,
    GrandMaster = 6,
}

impl RankTier {
    pub const ALL: [RankTier; 7] = [
        RankTier::Bronze,
        RankTier::Silver,
        RankTier::Gold,
        RankTier::Platinum,
        RankTier::Diamond,
        RankTier::Master,
        RankTier::GrandMaster,
    ];

    /// Inclusive lower bound on the average score.
    pub fn min_score(&self) -> f64 {
        match self {
            RankTier::Bronze => 0.0,
            RankTier::Silver => 30.0,
            RankTier::Gold => 50.0,
            RankTier::Platinum => 65.0,
            RankTier::Diamond => 75.0,
            RankTier::Master => 85.0,
            RankTier::GrandMaster => 95.0,
        }
    }

    /// Next tier up, if any.
    pub fn next(&self) -> Option<RankTier> {
        match self {
            RankTier::Bronze => Some(RankTier::Silver),
            RankTier::Silver => Some(RankTier::Gold),
            RankTier::Gold => Some(RankTier::Platinum),
            RankTier::Platinum => Some(RankTier::Diamond),
            RankTier::Diamond => Some(RankTier::Master),
            RankTier::Master => Some(RankTier::GrandMaster),
            RankTier::GrandMaster => None,
        }
    }

    /// Score shown as the target on the progress bar.
    ///
    /// Grand Master has no tier above it and displays against 100.
    pub fn next_tier_points(&self) -> u32 {
        match self.next() {
            Some(next) => next.min_score() as u32,
            None => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankTier::Bronze => "Bronze",
            RankTier::Silver => "Silver",
            RankTier::Gold => "Gold",
            RankTier::Platinum => "Platinum",
            RankTier::Diamond => "Diamond",
            RankTier::Master => "Master",
            RankTier::GrandMaster => "Grand Master",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RankTier::Bronze => "Newcomer",
            RankTier::Silver => "Still learning the games",
            RankTier::Gold => "Has mastered the basics",
            RankTier::Platinum => "Skilled player",
            RankTier::Diamond => "Consistent advanced player",
            RankTier::Master => "Seasoned veteran",
            RankTier::GrandMaster => "The very best",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RankTier::Bronze => "🥉",
            RankTier::Silver => "🥈",
            RankTier::Gold => "🥇",
            RankTier::Platinum => "⭐",
            RankTier::Diamond => "💠",
            RankTier::Master => "💎",
            RankTier::GrandMaster => "👑",
        }
    }

    /// Primary color followed by the gradient end color.
    pub fn gradient(&self) -> [&'static str; 2] {
        match self {
            RankTier::Bronze => ["#92400E", "#78350F"],
            RankTier::Silver => ["#6B7280", "#4B5563"],
            RankTier::Gold => ["#F59E0B", "#D97706"],
            RankTier::Platinum => ["#10B981", "#059669"],
            RankTier::Diamond => ["#06B6D4", "#0891B2"],
            RankTier::Master => ["#8B5CF6", "#3B82F6"],
            RankTier::GrandMaster => ["#FF6B35", "#F7931E"],
        }
    }

    /// Width of one division inside the tier (Grand Master has a single division).
    fn division_width(&self) -> Option<f64> {
        match self {
            RankTier::Bronze => Some(5.0),
            RankTier::Silver => Some(4.0),
            RankTier::Gold => Some(3.0),
            RankTier::Platinum | RankTier::Diamond | RankTier::Master => Some(2.0),
            RankTier::GrandMaster => None,
        }
    }

    /// Tier for an average score. Anything below Silver, negatives included, is Bronze.
    pub fn from_average(average_score: f64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|tier| average_score >= tier.min_score())
            .unwrap_or(RankTier::Bronze)
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Write for RankTier {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for RankTier {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        RankTier::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::InvalidEnum(value))
    }
}

impl FixedSize for RankTier {
    const SIZE: usize = 1;
}

/// Display metadata for a player's rank
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankInfo {
    pub tier: RankTier,
    pub division: u32,
    pub points: i64,
    pub next_tier_points: u32,
    pub average_score: f64,
    pub icon: &'static str,
    pub color: &'static str,
    pub gradient: [&'static str; 2],
}

impl RankInfo {
    /// Fraction of the way to `next_tier_points`, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        (self.average_score / self.next_tier_points as f64).clamp(0.0, 1.0)
    }

    /// Whole points still needed to reach the next tier.
    pub fn points_to_next(&self) -> i64 {
        self.next_tier_points as i64 - self.points
    }
}

/// Derive rank metadata from an average score.
pub fn rank_of(average_score: f64) -> RankInfo {
    let tier = RankTier::from_average(average_score);
    let next_tier_points = tier.next_tier_points();
    let division = match tier.division_width() {
        Some(width) => ((next_tier_points as f64 - average_score) / width).floor() as u32 + 1,
        None => 1,
    };
    let gradient = tier.gradient();
    RankInfo {
        tier,
        division,
        points: average_score.floor() as i64,
        next_tier_points,
        average_score,
        icon: tier.icon(),
        color: gradient[0],
        gradient,
    }
}
