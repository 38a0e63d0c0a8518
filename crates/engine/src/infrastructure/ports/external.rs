//! External service port traits (knowledge lookup).

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use mystery_animal_domain::KnowledgeEntity;

use super::error::LookupError;

/// Looks up what an unrecognised question might be about.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KnowledgePort: Send + Sync {
    /// Search for the best match of `query`, the utterance with stop words removed.
    ///
    /// Implementations stop work and return [`LookupError::Cancelled`] once
    /// `cancel` fires.
    async fn lookup(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<Option<KnowledgeEntity>, LookupError>;
}
