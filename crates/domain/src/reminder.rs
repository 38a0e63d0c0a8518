//! Reminder selection for the no-input path.
//!
//! When the player goes quiet, the game re-engages with an escalating list of
//! three prompts. Mid-round that list resurfaces something the player already
//! found out and suggests a category they have not tried yet.

use crate::aggregates::{AnswerRecord, GameSession, QUESTION_BUDGET};
use crate::category::Category;
use crate::grammar::{keys, Grammar, GrammarError, TemplateVar, Variables};
use crate::random::pick_index;

/// Prompts after a round has ended.
pub const PLAY_AGAIN_PROMPTS: [&str; 3] = [
    "Let me know if you want to play again.",
    "Hello? Do you wanna play again?",
    "Okay, bye!",
];

/// Suggestion used once every category has been asked about.
pub const HINT_SUGGESTION: &str = "You can ask for a hint.";

pub const STUCK_PROMPT: &str =
    "Feeling stuck? If you haven't already, try asking me, 'What questions can I ask?'";

pub const SLEEP_PROMPT: &str = "I’m going to go to sleep, but let’s play again soon.";

/// The three escalating reminder lines built from the round's answers.
///
/// `asked` is every category asked about so far; suggestions come from the
/// rest. Returns `None` when nothing has been answered this round.
pub fn reminder_lines<R>(
    grammar: &Grammar,
    answers: &[AnswerRecord],
    asked: &[Category],
    roll: &mut R,
) -> Result<Option<[String; 3]>, GrammarError>
where
    R: FnMut(i32, i32) -> i32 + ?Sized,
{
    let Some(picked) = pick_index(roll, answers.len()).and_then(|i| answers.get(i)) else {
        return Ok(None);
    };

    let vars = Variables::new().with(TemplateVar::Guess, picked.guess.as_str());
    let sentence = grammar.answer(picked.category, picked.result, &vars, roll)?;
    let already_found = already_found_fact(&sentence);

    let not_asked: Vec<Category> = Category::suggestable()
        .filter(|category| !asked.contains(category))
        .collect();

    let first = match pick_index(roll, not_asked.len())
        .and_then(|i| not_asked.get(i))
        .and_then(Category::friendly_name)
    {
        Some(suggestion) => {
            let vars = Variables::new()
                .with(TemplateVar::AlreadyFound, already_found)
                .with(TemplateVar::Suggestion, suggestion);
            grammar.script(keys::NO_INPUT_REMINDERS, &vars, roll)?
        }
        None => HINT_SUGGESTION.to_string(),
    };

    Ok(Some([first, STUCK_PROMPT.to_string(), SLEEP_PROMPT.to_string()]))
}

/// Prompts to attach to a response that waits for more input.
pub fn idle_prompts<R>(
    session: &GameSession,
    grammar: &Grammar,
    roll: &mut R,
) -> Result<Vec<String>, GrammarError>
where
    R: FnMut(i32, i32) -> i32 + ?Sized,
{
    if session.round_over() {
        return Ok(PLAY_AGAIN_PROMPTS.iter().map(|p| p.to_string()).collect());
    }
    if session.answers_found().is_empty() {
        return raw_prompts(grammar, keys::NO_INPUT_NO_INFO_FOUND);
    }
    if session.questions_asked() == QUESTION_BUDGET - 1 {
        return raw_prompts(grammar, keys::NO_INPUT_QUESTION_TWENTY);
    }
    match reminder_lines(
        grammar,
        session.answers_found(),
        session.category_history(),
        roll,
    )? {
        Some(lines) => Ok(lines.into()),
        None => raw_prompts(grammar, keys::NO_INPUT_NO_INFO_FOUND),
    }
}

fn raw_prompts(grammar: &Grammar, key: &str) -> Result<Vec<String>, GrammarError> {
    grammar
        .raw_script_array(key)
        .map(|lines| lines.into_iter().map(str::to_string).collect())
        .ok_or_else(|| GrammarError::UnknownRule(key.to_string()))
}

/// "Yes, I do eat leaves" -> "I do eat leaves."
fn already_found_fact(sentence: &str) -> String {
    let fact = sentence
        .split_once(", ")
        .map_or(sentence, |(_, rest)| rest)
        .trim();
    if fact.ends_with('.') {
        fact.to_string()
    } else {
        format!("{fact}.")
    }
}
