//! Static, read-only corpora: animal profiles and body masses by species.
//!
//! Both corpora are parsed from JSON and validated once at load time. Anything
//! the schema does not model (an unknown attribute key, an unrecognised
//! sentinel, a value of the wrong shape for its category) is rejected here
//! instead of surfacing as a silent fallback during play.

mod animal;
mod size;

pub use animal::{AnimalCorpus, AnimalProfile};
pub use size::{SizeCorpus, SizeEntry};

use thiserror::Error;

/// Sentinel meaning "found nearly everywhere" in the countries attribute.
pub const COMMONLY_FOUND: &str = "COMMONLY FOUND";

/// A stored correct answer, shaped by its category's evaluation mode.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Free text searched or compared by the guess
    Text(String),
    /// Whole-number facts such as leg count
    Count(i64),
    /// Pre-computed verdict for yes/no categories
    Verdict(crate::AnswerResult),
    /// The countries "commonly found" sentinel
    CommonlyFound,
}

/// Errors raised while loading a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorpusError {
    /// The document is not valid JSON for the expected layout
    #[error("Malformed corpus document: {0}")]
    Malformed(String),
    /// The corpus contains no entries
    #[error("Corpus '{0}' is empty")]
    Empty(&'static str),
    /// An entry failed validation
    #[error("Entry {index} ({name}): {message}")]
    InvalidEntry {
        index: usize,
        name: String,
        message: String,
    },
}

impl CorpusError {
    pub(crate) fn invalid(index: usize, name: &str, message: impl Into<String>) -> Self {
        Self::InvalidEntry {
            index,
            name: name.to_string(),
            message: message.into(),
        }
    }
}

/// All-caps marker strings are reserved for sentinels.
pub(crate) fn looks_like_sentinel(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_alphabetic())
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == ' ' || c == '_')
}
