//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use mystery_animal_domain::GameData;

use crate::infrastructure::{
    clock::SystemRandom,
    ports::{GameLogRepo, KnowledgePort, RandomPort, SessionRepo},
    ssml::SsmlRenderer,
};
use crate::use_cases::turn::{PlayTurn, TurnUseCases};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub data: Arc<GameData>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub turn: TurnUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        data: Arc<GameData>,
        sessions: Arc<dyn SessionRepo>,
        game_log: Arc<dyn GameLogRepo>,
        knowledge: Arc<dyn KnowledgePort>,
        ssml: SsmlRenderer,
        lookup_timeout: Duration,
    ) -> Self {
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());
        Self::with_random(
            data,
            sessions,
            game_log,
            knowledge,
            random,
            ssml,
            lookup_timeout,
        )
    }

    /// Same as [`App::new`] with an explicit source of randomness.
    pub fn with_random(
        data: Arc<GameData>,
        sessions: Arc<dyn SessionRepo>,
        game_log: Arc<dyn GameLogRepo>,
        knowledge: Arc<dyn KnowledgePort>,
        random: Arc<dyn RandomPort>,
        ssml: SsmlRenderer,
        lookup_timeout: Duration,
    ) -> Self {
        let play_turn = Arc::new(PlayTurn::new(
            data.clone(),
            sessions,
            game_log,
            knowledge,
            random,
            ssml,
            lookup_timeout,
        ));

        Self {
            data,
            use_cases: UseCases {
                turn: TurnUseCases::new(play_turn),
            },
        }
    }
}
