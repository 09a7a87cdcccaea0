use dicebattle_types::casino::Player;
use thiserror::Error;
use uuid::Uuid;

use crate::now_ms;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("sign in was cancelled")]
    Cancelled,
    #[error("sign in failed: {0}")]
    Failed(String),
}

/// Identity provider consulted when a player signs in.
///
/// Implementations return a fresh player record; stats are zeroed and the
/// rank starts at bronze.
pub trait AuthProvider {
    fn sign_in(&mut self) -> Result<Player, AuthError>;
}

/// Offline stand-in for LINE login.
#[derive(Clone, Debug)]
pub struct MockLineAuth {
    display_name: String,
    fail: bool,
}

impl MockLineAuth {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            fail: false,
        }
    }

    /// A provider whose every sign in is cancelled by the user.
    pub fn cancelled() -> Self {
        Self {
            display_name: String::new(),
            fail: true,
        }
    }
}

impl Default for MockLineAuth {
    fn default() -> Self {
        Self::new("LINE User")
    }
}

impl AuthProvider for MockLineAuth {
    fn sign_in(&mut self) -> Result<Player, AuthError> {
        if self.fail {
            return Err(AuthError::Cancelled);
        }
        let id = format!("line_{}", Uuid::new_v4().simple());
        let mut player = Player::new(id, self.display_name.clone(), now_ms());
        player.is_online = true;
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SessionError, SessionStore};
    use dicebattle_types::casino::RankTier;

    #[test]
    fn test_mock_sign_in_is_fresh() {
        let mut auth = MockLineAuth::new("Roller");
        let first = auth.sign_in().unwrap();
        let second = auth.sign_in().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.name, "Roller");
        assert_eq!(first.total_score, 0);
        assert_eq!(first.rank, RankTier::Bronze);
        assert!(first.is_online);
    }

    #[test]
    fn test_cancelled_sign_in_leaves_store() {
        let mut store = SessionStore::with_sample_players();
        let before = store.current_player().cloned();
        let result = store.sign_in(&mut MockLineAuth::cancelled());
        assert!(matches!(result, Err(SessionError::Auth(AuthError::Cancelled))));
        assert_eq!(store.current_player().cloned(), before);
        assert_eq!(store.players().len(), 5);
    }
}
