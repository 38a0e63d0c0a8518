//! Repository port traits.

use async_trait::async_trait;

use mystery_animal_domain::{GameSession, SessionId};

use super::error::RepoError;

/// One answered turn, as written to the game log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionLogEntry {
    pub session_id: SessionId,
    pub round: u32,
    pub raw_input: String,
    pub response: String,
    pub questions_asked: u32,
    /// The round was already over before this turn
    pub round_over: bool,
}

/// Per-round analytics storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameLogRepo: Send + Sync {
    async fn new_round(
        &self,
        session_id: &SessionId,
        round: u32,
        animal: &str,
    ) -> Result<(), RepoError>;

    /// Record a turn. Does nothing when `entry.round_over` is set.
    async fn save(&self, entry: &QuestionLogEntry) -> Result<(), RepoError>;

    async fn end_round(
        &self,
        session_id: &SessionId,
        round: u32,
        questions_asked: u32,
        won: bool,
    ) -> Result<(), RepoError>;
}

/// Session state between turns, last writer wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepo: Send + Sync {
    async fn load(&self, session_id: &SessionId) -> Result<Option<GameSession>, RepoError>;
    async fn save(&self, session: &GameSession) -> Result<(), RepoError>;
}
