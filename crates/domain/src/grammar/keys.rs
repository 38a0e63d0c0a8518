//! Script keys the game speaks from the response grammar.

// === Round lifecycle ===
/// Spoken on a fresh play session; split around the intro audio cue.
pub const INTRO: &str = "intro";
/// Spoken when a new round starts in an existing play session.
pub const NEW_ROUND: &str = "newRound";
/// Correct guess.
pub const WIN: &str = "win";
/// Question budget exhausted.
pub const LOSE: &str = "lose";
/// A question arrived after the round ended.
pub const ASK_PLAY_AGAIN: &str = "askPlayAgain";
/// Wrong guess.
pub const INCORRECT_GUESS: &str = "incorrectGuess";

// === Shared lead-ins used from answer topics ===
pub const YES: &str = "yes";
pub const NO: &str = "no";
pub const WELL: &str = "well";
pub const US: &str = "us";

// === Question budget ===
pub const REMAINING_15: &str = "remaining15";
pub const REMAINING_10: &str = "remaining10";
pub const REMAINING_5: &str = "remaining5";
pub const REMAINING_1: &str = "remaining1";
pub const QUESTIONS_LEFT: &str = "questionsLeft";

// === Hints ===
pub const GIVE_HINT: &str = "giveHint";
pub const NO_MORE_HINTS: &str = "noMoreHints";

// === Knowledge fallback ===
pub const DONT_KNOWS: &str = "dontknows";
pub const DONT_KNOW_REPEAT: &str = "dontknow_repeat";
pub const DONT_KNOW_NO_REPEAT: &str = "dontknow_norepeat";

// === Misc ===
pub const MISC_STUCK: &str = "MISC_stuck";

// === No-input escalation (raw arrays, not expanded) ===
pub const NO_INPUT_NO_INFO_FOUND: &str = "noInput_noInfoFound";
pub const NO_INPUT_QUESTION_TWENTY: &str = "noInput_QuestionTwenty";
pub const NO_INPUT_REMINDERS: &str = "noInput_reminders";

/// Milestone script announced when `remaining` questions are left.
pub fn milestone(remaining: u32) -> Option<&'static str> {
    match remaining {
        15 => Some(REMAINING_15),
        10 => Some(REMAINING_10),
        5 => Some(REMAINING_5),
        1 => Some(REMAINING_1),
        _ => None,
    }
}

/// Every script the game may expand or read raw.
pub fn all_keys() -> Vec<&'static str> {
    let mut keys = vec![
        INTRO,
        NEW_ROUND,
        WIN,
        LOSE,
        ASK_PLAY_AGAIN,
        INCORRECT_GUESS,
        YES,
        NO,
        WELL,
        US,
        REMAINING_15,
        REMAINING_10,
        REMAINING_5,
        REMAINING_1,
        QUESTIONS_LEFT,
        GIVE_HINT,
        NO_MORE_HINTS,
        DONT_KNOWS,
        DONT_KNOW_REPEAT,
        DONT_KNOW_NO_REPEAT,
        MISC_STUCK,
        NO_INPUT_NO_INFO_FOUND,
        NO_INPUT_QUESTION_TWENTY,
        NO_INPUT_REMINDERS,
    ];
    keys.extend(crate::MiscTopic::ALL.iter().map(|topic| topic.script_key()));
    keys.extend(crate::knowledge::KnowledgeTopic::ALL.iter().map(|topic| topic.script_key()));
    keys
}
