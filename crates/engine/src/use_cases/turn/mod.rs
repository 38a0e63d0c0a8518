//! Turn use cases.
//!
//! Handles one player utterance:
//! - Starting and restarting rounds
//! - Judging questions and guesses against the animal profile
//! - Falling back to the knowledge lookup for everything else

use std::sync::Arc;

mod fallback;
mod play_turn;
mod reply;

#[cfg(test)]
pub(crate) mod test_support;

pub use fallback::KnowledgeFallback;
pub use play_turn::{PlayTurn, TurnError, FALLBACK_LINE, GOODBYE_LINE};

/// Container for turn use cases.
pub struct TurnUseCases {
    pub play_turn: Arc<PlayTurn>,
}

impl TurnUseCases {
    pub fn new(play_turn: Arc<PlayTurn>) -> Self {
        Self { play_turn }
    }
}
