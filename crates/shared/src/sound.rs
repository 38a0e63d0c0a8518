use serde::{Deserialize, Serialize};

use mystery_animal_domain::AnswerResult;

/// Audio clip played ahead of a spoken response.
///
/// The serialized name is the clip's file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    #[serde(rename = "intro_intro")]
    Intro,
    #[serde(rename = "gameplay_yesA")]
    Yes,
    #[serde(rename = "gameplay_noA")]
    No,
    #[serde(rename = "gameplay_idleResponse")]
    Idle,
    #[serde(rename = "gameplay_correctGuess")]
    CorrectGuess,
    #[serde(rename = "gameplay_missedGuess")]
    MissedGuess,
    #[serde(rename = "end_lose")]
    Lose,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro_intro",
            Self::Yes => "gameplay_yesA",
            Self::No => "gameplay_noA",
            Self::Idle => "gameplay_idleResponse",
            Self::CorrectGuess => "gameplay_correctGuess",
            Self::MissedGuess => "gameplay_missedGuess",
            Self::Lose => "end_lose",
        }
    }

    /// Cue for a judged answer.
    pub fn for_result(result: AnswerResult) -> Self {
        match result {
            AnswerResult::True => Self::Yes,
            AnswerResult::False => Self::No,
            _ => Self::Idle,
        }
    }
}
