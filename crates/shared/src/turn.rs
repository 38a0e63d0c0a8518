//! Turn request/response contract
//!
//! The voice router classifies each utterance into a [`TurnIntent`] and posts a
//! [`TurnRequest`]; the engine answers with a [`TurnResponse`] carrying the
//! text to speak and the session state for the next turn.

use serde::{Deserialize, Serialize};

use mystery_animal_domain::{Category, CompareWord, GameSession, MiscTopic};

use crate::sound::SoundCue;

/// What the player asked for, as classified by the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TurnIntent {
    /// First contact: start a fresh play session
    Welcome,
    /// "Play again" / "restart"
    NewRound,
    /// A question about one category, e.g. diet = "leaves"
    #[serde(rename_all = "camelCase")]
    FindInfo {
        category: Category,
        #[serde(default)]
        guess: Option<String>,
    },
    /// "Are you bigger than a dog?"
    #[serde(rename_all = "camelCase")]
    CompareSize {
        #[serde(default)]
        animal: Option<String>,
        compare_word: CompareWord,
    },
    /// "Are you a giraffe?"
    Guess { animal: String },
    Hint,
    QuestionsLeft,
    RemindMe,
    /// Small talk and how-to-play questions
    Misc { topic: MiscTopic },
    /// One utterance that touched several categories
    Combo { categories: Vec<Category> },
    /// The router could not classify the utterance
    Unknown,
    /// The player said nothing before the platform timed out
    NoInput,
    Quit,
}

impl TurnIntent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::NewRound => "new_round",
            Self::FindInfo { .. } => "find_info",
            Self::CompareSize { .. } => "compare_size",
            Self::Guess { .. } => "guess",
            Self::Hint => "hint",
            Self::QuestionsLeft => "questions_left",
            Self::RemindMe => "remind_me",
            Self::Misc { .. } => "misc",
            Self::Combo { .. } => "combo",
            Self::Unknown => "unknown",
            Self::NoInput => "no_input",
            Self::Quit => "quit",
        }
    }
}

/// One inbound turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub session_id: String,
    pub intent: TurnIntent,
    /// The utterance as transcribed
    #[serde(default)]
    pub raw_utterance: String,
    /// State returned by the previous turn; loaded from the session store when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_state: Option<GameSession>,
}

/// The engine's reply to one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    /// Plain text, without markup
    pub spoken_text: String,
    /// Text wrapped with its audio cue
    pub ssml: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_cue: Option<SoundCue>,
    pub next_session_state: GameSession,
    /// False once the conversation should close
    pub expect_more_input: bool,
    /// Escalating prompts for when the player stays silent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub idle_prompts: Vec<String>,
}

/// Error body returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
