//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Session state and the game log (could swap memory/SQLite -> Firestore)
//! - The knowledge lookup (could swap Knowledge Graph -> another search API)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::{LookupError, RepoError};
pub use external::KnowledgePort;
pub use repos::{GameLogRepo, QuestionLogEntry, SessionRepo};
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use external::MockKnowledgePort;
#[cfg(test)]
pub use repos::{MockGameLogRepo, MockSessionRepo};
