//! What one turn says, before it is rendered.

use mystery_animal_domain::RoundEnded;
use mystery_animal_shared::SoundCue;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Reply {
    pub text: String,
    pub cue: Option<SoundCue>,
    /// Play the cue after the first sentence instead of before the text
    pub intro: bool,
    pub expect_more_input: bool,
    /// Whether a remaining-questions milestone may be appended
    pub takes_milestone: bool,
    /// Set when this turn closed the round
    pub round_end: Option<RoundEnded>,
}

impl Reply {
    pub fn cued(cue: SoundCue, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cue: Some(cue),
            intro: false,
            expect_more_input: true,
            takes_milestone: true,
            round_end: None,
        }
    }

    pub fn intro(text: impl Into<String>) -> Self {
        Self {
            intro: true,
            takes_milestone: false,
            ..Self::cued(SoundCue::Intro, text)
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            cue: None,
            ..Self::cued(SoundCue::Idle, text)
        }
    }

    pub fn closing_round(cue: SoundCue, text: impl Into<String>, ended: RoundEnded) -> Self {
        Self {
            takes_milestone: false,
            round_end: Some(ended),
            ..Self::cued(cue, text)
        }
    }

    pub fn without_milestone(mut self) -> Self {
        self.takes_milestone = false;
        self
    }

    /// End the conversation after this reply.
    pub fn goodbye(mut self) -> Self {
        self.expect_more_input = false;
        self.takes_milestone = false;
        self
    }

    pub fn append_milestone(&mut self, milestone: Option<String>) {
        if !self.takes_milestone {
            return;
        }
        if let Some(milestone) = milestone {
            self.text = join_sentences(&self.text, &milestone);
        }
    }
}

/// Join two spoken fragments with a single space.
pub(super) fn join_sentences(first: &str, second: &str) -> String {
    match (first.trim(), second.trim()) {
        ("", second) => second.to_string(),
        (first, "") => first.to_string(),
        (first, second) => format!("{first} {second}"),
    }
}
