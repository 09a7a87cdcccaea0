//! In-memory session store for dicebattle.
//!
//! The [SessionStore] owns the signed-in player, the player population, the
//! result history and the battle list. Scoring itself stays in
//! `dicebattle-execution`; the store only feeds results through it and keeps
//! the outputs.

use dicebattle_execution::{apply_result, casino::DiceSource, GameError};
use dicebattle_types::casino::{
    rank_of, top_players, Battle, GameResultRecord, GameType, Leaderboard, Player, RankInfo,
    BATTLE_MAX_PLAYERS, MAX_NAME_LENGTH, MIN_NAME_LENGTH, RANDOM_MATCH_OPPONENTS,
};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

mod auth;
mod config;
mod table;
mod timer;

pub use auth::{AuthError, AuthProvider, MockLineAuth};
pub use config::{Config, ConfigError, RollDelays, ValidatedConfig};
pub use table::GameTable;
pub use timer::{PendingRoll, RollTimer};

/// Current unix time in milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no player is signed in")]
    NotSignedIn,
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("name must be 2-20 characters (got {0})")]
    InvalidName(usize),
    #[error("unknown battle: {0}")]
    UnknownBattle(String),
    #[error("a battle needs at least one opponent")]
    NotEnoughPlayers,
    #[error("a battle allows at most 10 players (got {0})")]
    TooManyPlayers(usize),
    #[error("no opponents are online")]
    NoOpponentsOnline,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Signed-in player, population, history and battles for one app session.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    current: Option<String>,
    players: Vec<Player>,
    /// Most recent first.
    history: Vec<GameResultRecord>,
    /// Most recent first.
    battles: Vec<Battle>,
}

impl SessionStore {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    /// Store seeded with the demo population, the first player signed in.
    pub fn with_sample_players() -> Self {
        let players = sample_players(now_ms());
        let current = players.first().map(|p| p.id.clone());
        Self {
            current,
            players,
            ..Self::default()
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn history(&self) -> &[GameResultRecord] {
        &self.history
    }

    pub fn battles(&self) -> &[Battle] {
        &self.battles
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current.as_deref().and_then(|id| self.player(id))
    }

    fn current_index(&self) -> Result<usize, SessionError> {
        let id = self.current.as_deref().ok_or(SessionError::NotSignedIn)?;
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(SessionError::NotSignedIn)
    }

    /// Make `id` current. The history belongs to one player, so it is
    /// cleared whenever the current player changes.
    fn switch_to(&mut self, id: &str) {
        if self.current.as_deref() != Some(id) {
            self.history.clear();
        }
        self.current = Some(id.to_string());
    }

    /// Sign in through `auth`. The new player joins the front of the population
    /// (replacing any record with the same id) and becomes current.
    pub fn sign_in<A: AuthProvider>(&mut self, auth: &mut A) -> Result<&Player, SessionError> {
        let player = auth.sign_in()?;
        info!(player = %player.id, name = %player.name, "signed in");
        self.players.retain(|p| p.id != player.id);
        self.switch_to(&player.id);
        self.players.insert(0, player);
        Ok(&self.players[0])
    }

    /// Switch the current player to an existing member of the population.
    pub fn set_current_player(&mut self, id: &str) -> Result<&Player, SessionError> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SessionError::UnknownPlayer(id.to_string()))?;
        self.switch_to(id);
        Ok(&self.players[index])
    }

    /// Forget the current player and the session history.
    pub fn logout(&mut self) {
        if let Some(id) = self.current.take() {
            info!(player = %id, "signed out");
        }
        self.history.clear();
    }

    /// Append a result and fold it into the current player's statistics.
    ///
    /// Wins are counted over this session's history. The player record is
    /// replaced as a whole, and nothing changes when nobody is signed in.
    pub fn add_result(&mut self, record: GameResultRecord) -> Result<&Player, SessionError> {
        let index = self.current_index()?;
        let updated = apply_result(&self.players[index], &record, &self.history);
        info!(
            player = %updated.id,
            game = %record.game_type,
            score = record.score,
            outcome = ?record.outcome,
            average = updated.average_score,
            rank = %updated.rank,
            "recorded result"
        );
        self.history.insert(0, record);
        self.players[index] = updated;
        Ok(&self.players[index])
    }

    /// Rename the current player and/or change profile visibility.
    pub fn update_profile(
        &mut self,
        name: Option<&str>,
        profile_public: Option<bool>,
    ) -> Result<&Player, SessionError> {
        let index = self.current_index()?;
        let name = match name {
            Some(name) => {
                let trimmed = name.trim();
                let len = trimmed.chars().count();
                if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
                    return Err(SessionError::InvalidName(len));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        let player = &mut self.players[index];
        if let Some(name) = name {
            player.name = name;
        }
        if let Some(profile_public) = profile_public {
            player.profile_public = profile_public;
        }
        debug!(player = %player.id, "updated profile");
        Ok(player)
    }

    /// Rank metadata for the current player.
    pub fn rank_info(&self) -> Option<RankInfo> {
        self.current_player().map(|p| rank_of(p.average_score))
    }

    pub fn top_players(&self, limit: usize) -> Vec<Player> {
        top_players(&self.players, limit)
    }

    pub fn leaderboard(&self, limit: usize) -> Leaderboard {
        Leaderboard::build(&self.players, limit)
    }

    /// The current player's 1-based position within the top `limit`.
    pub fn current_position(&self, limit: usize) -> Option<u32> {
        let id = self.current.as_deref()?;
        self.leaderboard(limit).position_of(id)
    }

    pub fn recent_results(&self, count: usize) -> &[GameResultRecord] {
        &self.history[..count.min(self.history.len())]
    }

    /// Rounded win percentage over the last `count` results, 0 when empty.
    pub fn recent_win_rate(&self, count: usize) -> u32 {
        let recent = self.recent_results(count);
        if recent.is_empty() {
            return 0;
        }
        let wins = recent.iter().filter(|r| r.outcome.is_win()).count();
        (wins as f64 / recent.len() as f64 * 100.0).round() as u32
    }

    pub fn battle(&self, id: &str) -> Option<&Battle> {
        self.battles.iter().find(|b| b.id == id)
    }

    /// Open a battle between the current player and `opponents`.
    ///
    /// Unknown ids and duplicates are dropped.
    pub fn create_battle(
        &mut self,
        opponents: &[String],
        game_type: GameType,
    ) -> Result<&Battle, SessionError> {
        let me = self.current_player().ok_or(SessionError::NotSignedIn)?.id.clone();
        let mut participants = vec![me];
        for id in opponents {
            if self.player(id).is_some() && !participants.contains(id) {
                participants.push(id.clone());
            }
        }
        if participants.len() < 2 {
            return Err(SessionError::NotEnoughPlayers);
        }
        if participants.len() > BATTLE_MAX_PLAYERS {
            return Err(SessionError::TooManyPlayers(participants.len()));
        }

        let battle = Battle::new(Uuid::new_v4().to_string(), participants, game_type, now_ms());
        info!(
            battle = %battle.id,
            game = %game_type,
            players = battle.players.len(),
            "created battle"
        );
        self.battles.insert(0, battle);
        Ok(&self.battles[0])
    }

    /// Battle against up to three random online opponents.
    pub fn random_match<S: DiceSource>(
        &mut self,
        game_type: GameType,
        source: &mut S,
    ) -> Result<&Battle, SessionError> {
        let me = self.current_player().ok_or(SessionError::NotSignedIn)?.id.clone();
        let mut online: Vec<String> = self
            .players
            .iter()
            .filter(|p| p.is_online && p.id != me)
            .map(|p| p.id.clone())
            .collect();
        if online.is_empty() {
            return Err(SessionError::NoOpponentsOnline);
        }
        source.shuffle(&mut online);
        online.truncate(RANDOM_MATCH_OPPONENTS);
        self.create_battle(&online, game_type)
    }

    /// Apply an arbitrary change to a battle.
    pub fn update_battle<F>(&mut self, id: &str, update: F) -> Result<&Battle, SessionError>
    where
        F: FnOnce(&mut Battle),
    {
        let battle = self
            .battles
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| SessionError::UnknownBattle(id.to_string()))?;
        update(battle);
        Ok(battle)
    }

    /// Record a participant's roll in a battle. Returns whether it counted.
    pub fn record_battle_result(
        &mut self,
        id: &str,
        player: &str,
        record: GameResultRecord,
    ) -> Result<bool, SessionError> {
        let now = now_ms();
        let mut accepted = false;
        let battle = self.update_battle(id, |battle| {
            accepted = battle.record(player, record, now);
        })?;
        debug!(battle = %battle.id, player, accepted, round = battle.current_round, "battle roll");
        Ok(accepted)
    }
}

/// Demo population. Averages and tiers are derived from the totals.
pub fn sample_players(now: u64) -> Vec<Player> {
    const DAY_MS: u64 = 86_400_000;
    [
        ("1", "Dice King", 15_420, 156, 78.2, true),
        ("2", "Lucky Roller", 12_340, 134, 72.4, true),
        ("3", "Dice Ninja", 9_876, 112, 68.8, false),
        ("4", "Chinchiro Master", 8_765, 98, 71.4, true),
        ("5", "Cho-Han Pro", 7_234, 87, 65.5, true),
    ]
    .into_iter()
    .map(|(id, name, total_score, matches_played, win_rate, is_online)| {
        let average_score = dicebattle_execution::stats::average_score(total_score, matches_played);
        Player {
            id: id.to_string(),
            name: name.to_string(),
            total_score,
            matches_played,
            average_score,
            rank: rank_of(average_score).tier,
            win_rate,
            is_online,
            profile_public: true,
            created_at: now.saturating_sub(90 * DAY_MS),
            last_login_at: if is_online { now } else { now.saturating_sub(DAY_MS) },
        }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicebattle_execution::mocks::{create_record, ScriptedDice};
    use dicebattle_types::casino::{BattleStatus, Outcome, RankTier, BATTLE_MAX_ROUNDS};

    fn signed_in_store() -> SessionStore {
        let mut store = SessionStore::with_sample_players();
        store
            .sign_in(&mut MockLineAuth::new("LINE user"))
            .expect("mock sign in");
        store
    }

    #[test]
    fn test_sample_population() {
        let store = SessionStore::with_sample_players();
        assert_eq!(store.players().len(), 5);
        assert_eq!(store.current_player().map(|p| p.id.as_str()), Some("1"));
        for player in store.players() {
            let expected = player.total_score as f64 / player.matches_played as f64;
            assert_eq!(player.average_score, expected);
        }
        assert_eq!(store.players()[0].rank, RankTier::GrandMaster);
    }

    #[test]
    fn test_sign_in_prepends_fresh_player() {
        let store = signed_in_store();
        let me = store.current_player().unwrap();
        assert!(me.id.starts_with("line_"));
        assert_eq!(me.rank, RankTier::Bronze);
        assert_eq!(me.matches_played, 0);
        assert_eq!(store.players()[0].id, me.id);
        assert_eq!(store.players().len(), 6);
    }

    #[test]
    fn test_add_result_updates_current_and_population() {
        let mut store = signed_in_store();
        let record = create_record(GameType::SicBo, &[4, 5, 6], 10, Outcome::Win);
        let player = store.add_result(record).unwrap().clone();
        assert_eq!(player.total_score, 10);
        assert_eq!(player.win_rate, 100.0);
        assert_eq!(store.history().len(), 1);

        let record = create_record(GameType::SicBo, &[1, 2, 3], -5, Outcome::Lose);
        store.add_result(record).unwrap();
        let player = store.player(&player.id).unwrap();
        assert_eq!(player.total_score, 5);
        assert_eq!(player.average_score, 2.5);
        assert_eq!(player.win_rate, 50.0);
        // Most recent first
        assert_eq!(store.history()[0].score, -5);
    }

    #[test]
    fn test_add_result_requires_sign_in() {
        let mut store = SessionStore::new(Vec::new());
        let record = create_record(GameType::ChoHan, &[1, 1], 8, Outcome::Win);
        assert!(matches!(
            store.add_result(record),
            Err(SessionError::NotSignedIn)
        ));
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_switching_player_starts_fresh_history() {
        let mut store = SessionStore::with_sample_players();
        for _ in 0..3 {
            store
                .add_result(create_record(GameType::ChoHan, &[1, 1], 8, Outcome::Win))
                .unwrap();
        }
        assert_eq!(store.history().len(), 3);

        // A new sign in does not inherit the previous player's wins
        store.sign_in(&mut MockLineAuth::new("Fresh")).unwrap();
        assert!(store.history().is_empty());
        let player = store
            .add_result(create_record(GameType::ChoHan, &[1, 2], -4, Outcome::Lose))
            .unwrap();
        assert_eq!(player.matches_played, 1);
        assert_eq!(player.win_rate, 0.0);

        // Nor does switching to an existing player
        store.set_current_player("2").unwrap();
        assert!(store.history().is_empty());
        let before = store.current_player().unwrap().clone();
        let player = store
            .add_result(create_record(GameType::ChoHan, &[1, 2], -4, Outcome::Lose))
            .unwrap();
        assert_eq!(player.matches_played, before.matches_played + 1);
        assert_eq!(player.win_rate, 0.0);
        assert!(player.win_rate <= 100.0);
    }

    #[test]
    fn test_reselecting_current_player_keeps_history() {
        let mut store = SessionStore::with_sample_players();
        store
            .add_result(create_record(GameType::SicBo, &[4, 5, 6], 10, Outcome::Win))
            .unwrap();
        store.set_current_player("1").unwrap();
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_logout_clears_history() {
        let mut store = signed_in_store();
        store
            .add_result(create_record(GameType::OddEven, &[1, 1, 1], 8, Outcome::Win))
            .unwrap();
        store.logout();
        assert!(store.current_player().is_none());
        assert!(store.history().is_empty());
        assert!(store.rank_info().is_none());
    }

    #[test]
    fn test_update_profile_validates_name() {
        let mut store = signed_in_store();
        assert!(matches!(
            store.update_profile(Some("  a "), None),
            Err(SessionError::InvalidName(1))
        ));
        assert!(matches!(
            store.update_profile(Some(&"x".repeat(21)), None),
            Err(SessionError::InvalidName(21))
        ));
        let player = store.update_profile(Some("  Roller  "), Some(false)).unwrap();
        assert_eq!(player.name, "Roller");
        assert!(!player.profile_public);
    }

    #[test]
    fn test_recent_win_rate() {
        let mut store = signed_in_store();
        assert_eq!(store.recent_win_rate(10), 0);
        for (score, outcome) in [(8, Outcome::Win), (-4, Outcome::Lose), (8, Outcome::Win)] {
            store
                .add_result(create_record(GameType::ChoHan, &[1, 1], score, outcome))
                .unwrap();
        }
        assert_eq!(store.recent_win_rate(10), 67);
        assert_eq!(store.recent_win_rate(1), 100);
        assert_eq!(store.recent_results(2).len(), 2);
    }

    #[test]
    fn test_leaderboard_position() {
        let store = signed_in_store();
        let board = store.leaderboard(100);
        assert_eq!(board.entries[0].name, "Dice King");
        // The new player has the lowest average
        assert_eq!(store.current_position(100), Some(6));
        assert_eq!(store.current_position(3), None);
        assert_eq!(store.top_players(3).len(), 3);
    }

    #[test]
    fn test_create_battle() {
        let mut store = signed_in_store();
        let opponents = vec!["2".to_string(), "2".to_string(), "ghost".to_string()];
        let battle = store.create_battle(&opponents, GameType::ChoHan).unwrap();
        assert_eq!(battle.players.len(), 2);
        assert_eq!(battle.status, BattleStatus::Waiting);
        assert_eq!(battle.max_rounds, BATTLE_MAX_ROUNDS);

        assert!(matches!(
            store.create_battle(&["ghost".to_string()], GameType::SicBo),
            Err(SessionError::NotEnoughPlayers)
        ));
    }

    #[test]
    fn test_create_battle_limit() {
        let mut players: Vec<Player> = (0..12)
            .map(|i| Player::new(i.to_string(), format!("P{i}"), 0))
            .collect();
        players.push(Player::new("me".to_string(), "Me".to_string(), 0));
        let mut store = SessionStore::new(players);
        store.set_current_player("me").unwrap();

        let opponents: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        assert!(matches!(
            store.create_battle(&opponents, GameType::SicBo),
            Err(SessionError::TooManyPlayers(13))
        ));
        assert!(store.create_battle(&opponents[..9], GameType::SicBo).is_ok());
    }

    #[test]
    fn test_random_match_picks_online_opponents() {
        let mut store = signed_in_store();
        let mut dice = ScriptedDice::new(&[3, 1, 4, 1, 5, 2]);
        let battle = store.random_match(GameType::SicBo, &mut dice).unwrap().clone();
        assert_eq!(battle.players.len(), 1 + RANDOM_MATCH_OPPONENTS);
        let me = store.current_player().unwrap().id.clone();
        assert_eq!(battle.players[0], me);
        for id in &battle.players[1..] {
            let player = store.player(id).unwrap();
            assert!(player.is_online);
            assert_ne!(player.id, me);
        }
    }

    #[test]
    fn test_random_match_without_opponents() {
        let mut store = SessionStore::new(vec![Player::new("me".to_string(), "Me".to_string(), 0)]);
        store.set_current_player("me").unwrap();
        let mut dice = ScriptedDice::new(&[1]);
        assert!(matches!(
            store.random_match(GameType::ChoHan, &mut dice),
            Err(SessionError::NoOpponentsOnline)
        ));
    }

    #[test]
    fn test_battle_flow() {
        let mut store = signed_in_store();
        let me = store.current_player().unwrap().id.clone();
        let id = store
            .create_battle(&["2".to_string()], GameType::ChoHan)
            .unwrap()
            .id
            .clone();

        for _ in 0..BATTLE_MAX_ROUNDS {
            let mine = create_record(GameType::ChoHan, &[1, 2], -4, Outcome::Lose);
            let theirs = create_record(GameType::ChoHan, &[1, 1], 8, Outcome::Win);
            assert!(store.record_battle_result(&id, &me, mine).unwrap());
            assert!(store.record_battle_result(&id, "2", theirs).unwrap());
        }
        let battle = store.battle(&id).unwrap();
        assert_eq!(battle.status, BattleStatus::Completed);
        assert_eq!(battle.winner.as_deref(), Some("2"));

        store
            .update_battle(&id, |b| {
                b.cancel(0);
            })
            .unwrap();
        assert_eq!(store.battle(&id).unwrap().status, BattleStatus::Completed);
        assert!(matches!(
            store.update_battle("missing", |_| {}),
            Err(SessionError::UnknownBattle(_))
        ));
    }
}
