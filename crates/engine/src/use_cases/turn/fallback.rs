//! Knowledge lookup for questions the game cannot answer itself.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use mystery_animal_domain::{GameSession, KnowledgeAnswer, KnowledgeEntity, Lexicon};

use crate::infrastructure::ports::{KnowledgePort, LookupError};

/// Issues one cancellable lookup per unrecognised question.
pub struct KnowledgeFallback {
    knowledge: Arc<dyn KnowledgePort>,
    timeout: Duration,
}

impl KnowledgeFallback {
    pub fn new(knowledge: Arc<dyn KnowledgePort>, timeout: Duration) -> Self {
        Self { knowledge, timeout }
    }

    /// Find out what `utterance` is about.
    ///
    /// The session sits in `AwaitingFallback` for the duration of the lookup and
    /// is back in `RoundActive` when this returns, whatever the outcome.
    pub async fn resolve(
        &self,
        session: &mut GameSession,
        lexicon: &Lexicon,
        utterance: &str,
    ) -> Option<KnowledgeAnswer> {
        if let Err(e) = session.begin_fallback() {
            tracing::warn!(
                session_id = %session.session_id(),
                error = %e,
                "Skipping knowledge lookup"
            );
            return None;
        }

        let query = lexicon.query_text(utterance);
        let entity = if query.is_empty() {
            None
        } else {
            self.lookup(&query).await
        };
        session.finish_fallback();

        entity.and_then(|entity| lexicon.classify(utterance, &entity))
    }

    async fn lookup(&self, query: &str) -> Option<KnowledgeEntity> {
        let cancel = CancellationToken::new();

        let outcome = tokio::select! {
            result = self.knowledge.lookup(query, cancel.child_token()) => result,
            _ = tokio::time::sleep(self.timeout) => {
                cancel.cancel();
                Err(LookupError::Cancelled)
            }
        };

        match outcome {
            Ok(entity) => entity,
            Err(e) => {
                tracing::warn!(query, error = %e, "Knowledge lookup unavailable");
                None
            }
        }
    }
}
