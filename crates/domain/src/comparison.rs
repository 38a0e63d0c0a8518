//! Size comparison - "is it bigger than a dog?"
//!
//! The challenger is resolved against the size corpus by name, its mass is
//! averaged over every matching species, and the result is judged against the
//! mystery animal's mass.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::corpus::SizeCorpus;
use crate::AnswerResult;

/// Masses within this fraction of each other are "about the same size".
pub const COMPARABLE_BAND: f64 = 0.2;

/// The comparison the player asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompareWord {
    BiggerThan,
    SmallerThan,
    /// Anything the router passed that we do not model
    Other(String),
}

impl CompareWord {
    pub fn as_str(&self) -> &str {
        match self {
            Self::BiggerThan => "bigger than",
            Self::SmallerThan => "smaller than",
            Self::Other(word) => word,
        }
    }

    /// The opposite comparison, if this one is modeled.
    #[cfg(test)]
    pub(crate) fn inverted(&self) -> Self {
        match self {
            Self::BiggerThan => Self::SmallerThan,
            Self::SmallerThan => Self::BiggerThan,
            Self::Other(word) => Self::Other(word.clone()),
        }
    }
}

impl From<String> for CompareWord {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "bigger than" => Self::BiggerThan,
            "smaller than" => Self::SmallerThan,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for CompareWord {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CompareWord> for String {
    fn from(value: CompareWord) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CompareWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single size question against the current animal.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeComparisonQuery<'a> {
    pub compare_word: CompareWord,
    pub challenger: &'a str,
    pub target_name: &'a str,
    pub target_mass_grams: f64,
}

impl SizeComparisonQuery<'_> {
    /// Player-facing restatement, e.g. "bigger than a dog".
    pub fn guess_text(&self) -> String {
        format!("{} a {}", self.compare_word, self.challenger.trim())
    }
}

/// Resolve a size comparison.
pub fn compare_size(corpus: &SizeCorpus, query: &SizeComparisonQuery<'_>) -> AnswerResult {
    let challenger = normalize(query.challenger);
    if challenger == normalize(query.target_name) {
        return AnswerResult::Sometimes;
    }

    let Some(challenger_mass) = average_mass(corpus, &challenger) else {
        return AnswerResult::Possible;
    };

    let target_mass = query.target_mass_grams;
    let band_min = (1.0 - COMPARABLE_BAND) * target_mass;
    let band_max = (1.0 + COMPARABLE_BAND) * target_mass;
    if challenger_mass >= band_min && challenger_mass < band_max {
        return AnswerResult::Sometimes;
    }

    let target_is_bigger = challenger_mass <= target_mass;
    match (&query.compare_word, target_is_bigger) {
        (CompareWord::BiggerThan, true) | (CompareWord::SmallerThan, false) => AnswerResult::True,
        (CompareWord::BiggerThan, false) | (CompareWord::SmallerThan, true) => AnswerResult::False,
        (CompareWord::Other(_), _) => AnswerResult::Unknown,
    }
}

/// Average mass over every name variant whose trailing words equal the challenger.
///
/// "dog" matches "Domestic Dog" and "Prairie Dog" but not "Dogfish"; "prairie dog"
/// matches only the latter.
fn average_mass(corpus: &SizeCorpus, challenger: &str) -> Option<f64> {
    let word_count = challenger.split_whitespace().count();
    let masses: Vec<f64> = corpus
        .entries()
        .iter()
        .filter(|entry| entry.common_names.to_lowercase().contains(challenger))
        .flat_map(|entry| {
            entry
                .name_variants()
                .filter(move |variant| short_name(variant, word_count) == challenger)
                .map(move |_| entry.mass_average_g.round())
        })
        .collect();

    if masses.is_empty() {
        return None;
    }
    Some(masses.iter().sum::<f64>() / masses.len() as f64)
}

fn short_name(variant: &str, word_count: usize) -> String {
    let words: Vec<&str> = variant.split_whitespace().collect();
    let start = words.len().saturating_sub(word_count);
    words[start..].join(" ").to_lowercase()
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
