//! In-process session state, keyed by the platform's session id.

use async_trait::async_trait;
use dashmap::DashMap;

use mystery_animal_domain::{GameSession, SessionId};

use crate::infrastructure::ports::{RepoError, SessionRepo};

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, GameSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionRepo for InMemorySessionStore {
    async fn load(&self, session_id: &SessionId) -> Result<Option<GameSession>, RepoError> {
        Ok(self
            .sessions
            .get(session_id)
            .map(|entry| entry.value().clone()))
    }

    async fn save(&self, session: &GameSession) -> Result<(), RepoError> {
        self.sessions
            .insert(session.session_id().clone(), session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn last_write_wins_per_session() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new("s1");
        assert!(store.load(&id).await.unwrap().is_none());

        let mut session = GameSession::new(id.clone());
        store.save(&session).await.unwrap();
        session.quit();
        store.save(&session).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.load(&id).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        store.save(&GameSession::new(SessionId::new("a"))).await.unwrap();

        assert!(store.load(&SessionId::new("b")).await.unwrap().is_none());
    }
}
