use dicebattle_execution::{
    casino::{chinchirorin::Hand, chinchirorin::Round, roll, validate_bet, DiceSource},
    evaluate, StreakTracker,
};
use dicebattle_types::casino::{Bet, GameResultRecord, GameType};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{now_ms, PendingRoll, RollTimer, SessionError, SessionStore};

/// One game screen: the selected bet, win streak, roll budget and the
/// delayed roll.
#[derive(Debug)]
pub struct GameTable {
    game_type: GameType,
    bet: Option<Bet>,
    streak: StreakTracker,
    round: Option<Round>,
    score: i64,
    delay: Duration,
    timer: RollTimer,
}

impl GameTable {
    pub fn new(game_type: GameType) -> Self {
        Self::with_delay(game_type, game_type.roll_delay())
    }

    pub fn with_delay(game_type: GameType, delay: Duration) -> Self {
        Self {
            game_type,
            bet: None,
            streak: StreakTracker::new(),
            round: (game_type == GameType::Chinchirorin).then(Round::new),
            score: 0,
            delay,
            timer: RollTimer::new(),
        }
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn bet(&self) -> Option<Bet> {
        self.bet
    }

    pub fn streak(&self) -> u32 {
        self.streak.current()
    }

    /// Score accumulated at this table since it was opened or reset.
    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn is_rolling(&self) -> bool {
        self.timer.is_pending()
    }

    /// Choose a side. Bets from another game are rejected.
    pub fn select_bet(&mut self, bet: Bet) -> Result<(), SessionError> {
        validate_bet(self.game_type, Some(bet))?;
        self.bet = Some(bet);
        Ok(())
    }

    /// Fails when a bet is missing or the chinchirorin round is used up.
    pub fn check_ready(&self) -> Result<(), SessionError> {
        validate_bet(self.game_type, self.bet)?;
        if let Some(round) = &self.round {
            round.ensure_can_roll()?;
        }
        Ok(())
    }

    /// Start the roll animation, replacing any roll still pending.
    pub fn request_roll(&mut self, store: &SessionStore) -> Result<PendingRoll, SessionError> {
        store.current_player().ok_or(SessionError::NotSignedIn)?;
        self.check_ready()?;
        Ok(self.timer.arm(self.delay))
    }

    /// Drop the pending roll. Returns whether one was pending.
    pub fn cancel_roll(&mut self) -> bool {
        self.timer.cancel()
    }

    /// Roll now and record the result against the signed-in player.
    ///
    /// The multiplier uses the streak held before this roll. Nothing changes
    /// when the table is not ready or nobody is signed in.
    pub fn resolve<S: DiceSource>(
        &mut self,
        store: &mut SessionStore,
        source: &mut S,
    ) -> Result<GameResultRecord, SessionError> {
        store.current_player().ok_or(SessionError::NotSignedIn)?;
        self.check_ready()?;

        let dice = roll(source, self.game_type.dice_count());
        let evaluation = evaluate(self.game_type, &dice, self.bet, self.streak.current())?;
        if let Some(round) = &mut self.round {
            round.record(Hand::of([dice[0], dice[1], dice[2]]))?;
        }
        self.streak.record(self.game_type, evaluation.outcome);
        self.score += evaluation.score;

        let record = GameResultRecord {
            id: Uuid::new_v4().to_string(),
            game_type: self.game_type,
            dice,
            bet: self.bet.map_or(evaluation.label, |bet| bet.to_string()),
            score: evaluation.score,
            timestamp: now_ms(),
            outcome: evaluation.outcome,
            multiplier: evaluation.multiplier,
        };
        debug!(
            game = %self.game_type,
            streak = self.streak.current(),
            table_score = self.score,
            "resolved roll"
        );
        store.add_result(record.clone())?;
        Ok(record)
    }

    /// Request a roll, wait out the animation, then resolve it.
    ///
    /// Returns `None` when the roll was cancelled before it fired.
    pub async fn roll<S: DiceSource>(
        &mut self,
        store: &mut SessionStore,
        source: &mut S,
    ) -> Result<Option<GameResultRecord>, SessionError> {
        let pending = self.request_roll(store)?;
        if !pending.wait().await {
            info!(game = %self.game_type, "roll cancelled");
            return Ok(None);
        }
        self.resolve(store, source).map(Some)
    }

    /// Back to a fresh table: no bet, no streak, a new round.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.bet = None;
        self.streak.reset();
        self.score = 0;
        if self.round.is_some() {
            self.round = Some(Round::new());
        }
    }
}
