//! Answer evaluation - judges a player's guess against corpus truth.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::EvaluationMode;
use crate::corpus::AttributeValue;

/// Outcome of judging a question.
///
/// The serialized names double as the rule keys in the response grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerResult {
    #[serde(rename = "response_true")]
    True,
    #[serde(rename = "response_false")]
    False,
    #[serde(rename = "response_possible")]
    Possible,
    #[serde(rename = "response_sometimes")]
    Sometimes,
    #[serde(rename = "unknown")]
    Unknown,
}

impl AnswerResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "response_true",
            Self::False => "response_false",
            Self::Possible => "response_possible",
            Self::Sometimes => "response_sometimes",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a verdict stored directly in the corpus (yes/no categories).
    ///
    /// `unknown` is not a valid stored verdict.
    pub fn from_verdict(value: &str) -> Option<Self> {
        match value {
            "response_true" => Some(Self::True),
            "response_false" => Some(Self::False),
            "response_possible" => Some(Self::Possible),
            "response_sometimes" => Some(Self::Sometimes),
            _ => None,
        }
    }

    /// Whether this result can be phrased by the response generator.
    pub fn is_answerable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for AnswerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a numeric comparison question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountIntent {
    More,
    Less,
}

/// Judge `guess` against the corpus value for a category.
///
/// An absent or blank guess is always [`AnswerResult::Unknown`]; callers must
/// send that to the knowledge fallback rather than phrase it as an answer.
pub fn check_guess(
    mode: EvaluationMode,
    correct: &AttributeValue,
    guess: Option<&str>,
) -> AnswerResult {
    let guess = match guess.map(str::trim) {
        Some(guess) if !guess.is_empty() => guess,
        _ => return AnswerResult::Unknown,
    };

    match (mode, correct) {
        (EvaluationMode::Count, AttributeValue::Count(count)) => {
            verdict(guess.parse::<i64>().ok() == Some(*count))
        }
        (EvaluationMode::SpecialCategories, AttributeValue::Text(text)) => verdict(guess == text),
        (EvaluationMode::YesNo, AttributeValue::Verdict(result)) => *result,
        (EvaluationMode::SpecialInfo | EvaluationMode::Match, AttributeValue::Text(text)) => {
            verdict(text.contains(guess))
        }
        (EvaluationMode::Countries, AttributeValue::CommonlyFound) => AnswerResult::Possible,
        (EvaluationMode::Countries, AttributeValue::Text(text)) => verdict(text.contains(guess)),
        (EvaluationMode::CompareLegsNumber, AttributeValue::Count(count)) => {
            compare_count(*count, guess)
        }
        // Shapes the corpus loader rejects
        _ => AnswerResult::Unknown,
    }
}

fn verdict(is_true: bool) -> AnswerResult {
    if is_true {
        AnswerResult::True
    } else {
        AnswerResult::False
    }
}

/// Evaluate `<more|less> than <n>` against a count.
fn compare_count(count: i64, guess: &str) -> AnswerResult {
    let Some((intent, number)) = parse_count_comparison(guess) else {
        return AnswerResult::Unknown;
    };

    if count == number {
        return AnswerResult::False;
    }
    match intent {
        CountIntent::More => verdict(count > number),
        CountIntent::Less => verdict(count < number),
    }
}

fn parse_count_comparison(guess: &str) -> Option<(CountIntent, i64)> {
    let tokens: Vec<&str> = guess.split_whitespace().collect();
    let [word, than, number] = tokens.as_slice() else {
        return None;
    };
    if !than.eq_ignore_ascii_case("than") {
        return None;
    }
    let intent = match word.to_ascii_lowercase().as_str() {
        "more" => CountIntent::More,
        "less" | "fewer" => CountIntent::Less,
        _ => return None,
    };
    let number = number.parse::<i64>().ok()?;
    Some((intent, number))
}
