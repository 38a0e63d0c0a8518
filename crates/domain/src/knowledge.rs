//! Knowledge fallback shaping.
//!
//! Questions the game cannot judge are sent to an external entity search. This
//! module owns the parts of that exchange that are pure: trimming the query,
//! spotting profanity, and turning the first search hit into the script that
//! phrases it.

use std::collections::HashSet;

use serde::Deserialize;

use crate::corpus::CorpusError;
use crate::grammar::keys;

/// Descriptions that mark the hit as an animal, regardless of its types.
const ANIMAL_DESCRIPTIONS: [&str; 6] = ["Animal", "Fish", "Reptile", "Bird", "Amphibian", "Amphibians"];

/// How a knowledge hit is phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnowledgeTopic {
    Person,
    MovieTv,
    Book,
    Place,
    VideoGame,
    Animal,
    General,
    /// The input was rude; acknowledge without repeating it
    NoRepeat,
}

impl KnowledgeTopic {
    pub const ALL: [KnowledgeTopic; 8] = [
        Self::Person,
        Self::MovieTv,
        Self::Book,
        Self::Place,
        Self::VideoGame,
        Self::Animal,
        Self::General,
        Self::NoRepeat,
    ];

    pub fn script_key(&self) -> &'static str {
        match self {
            Self::Person => "KG_person",
            Self::MovieTv => "KG_movietv",
            Self::Book => "KG_book",
            Self::Place => "KG_place",
            Self::VideoGame => "KG_videogame",
            Self::Animal => "KG_animal",
            Self::General => "KG_general",
            Self::NoRepeat => "KG_noRepeat",
        }
    }

    fn from_types(types: &[String]) -> Self {
        let has = |name: &str| types.iter().any(|t| t == name);
        if has("Person") {
            Self::Person
        } else if has("Movie") || has("TVSeries") || has("MovieSeries") {
            Self::MovieTv
        } else if has("Book") {
            Self::Book
        } else if has("Place") {
            Self::Place
        } else if has("VideoGame") || has("VideoGameSeries") {
            Self::VideoGame
        } else {
            Self::General
        }
    }
}

/// The first hit of an entity search, as returned by the lookup adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeEntity {
    /// Schema.org style types, e.g. `["Thing", "Person"]`
    pub types: Vec<String>,
    pub description: Option<String>,
}

/// A usable knowledge answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeAnswer {
    pub topic: KnowledgeTopic,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct RawStopWords {
    #[serde(rename = "stopWords")]
    stop_words: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawProfanities {
    badwords: Vec<String>,
}

/// Stop words and profanities, compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    profanities: HashSet<String>,
}

impl Lexicon {
    pub fn new<S, P>(stop_words: S, profanities: P) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Self {
            stop_words: stop_words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            profanities: profanities.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Parse `{"stopWords": [...]}` and `{"badwords": [...]}`.
    pub fn from_json(stop_words: &str, profanities: &str) -> Result<Self, CorpusError> {
        let stop: RawStopWords =
            serde_json::from_str(stop_words).map_err(|e| CorpusError::Malformed(e.to_string()))?;
        let bad: RawProfanities =
            serde_json::from_str(profanities).map_err(|e| CorpusError::Malformed(e.to_string()))?;
        Ok(Self::new(stop.stop_words, bad.badwords))
    }

    /// The search query: the utterance without stop words.
    pub fn query_text(&self, utterance: &str) -> String {
        utterance
            .split_whitespace()
            .filter(|word| !self.stop_words.contains(&word.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the utterance contains a profanity or a masked word.
    pub fn is_profane(&self, utterance: &str) -> bool {
        utterance.contains('*')
            || utterance
                .split_whitespace()
                .any(|word| self.profanities.contains(&word.to_lowercase()))
    }

    /// Turn a search hit into a phrased answer. Hits without a description are
    /// treated as no hit.
    pub fn classify(&self, utterance: &str, entity: &KnowledgeEntity) -> Option<KnowledgeAnswer> {
        let description = entity
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())?;

        let topic = if self.is_profane(utterance) {
            KnowledgeTopic::NoRepeat
        } else if ANIMAL_DESCRIPTIONS.contains(&description) {
            KnowledgeTopic::Animal
        } else {
            KnowledgeTopic::from_types(&entity.types)
        };

        Some(KnowledgeAnswer {
            topic,
            description: description.to_string(),
        })
    }

    /// Script used when the lookup found nothing or was unavailable.
    pub fn dont_know_script(&self, utterance: &str) -> &'static str {
        if self.is_profane(utterance) {
            keys::DONT_KNOW_NO_REPEAT
        } else {
            keys::DONT_KNOW_REPEAT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::new(["what", "is", "a", "the"], ["darn"])
    }

    fn entity(types: &[&str], description: Option<&str>) -> KnowledgeEntity {
        KnowledgeEntity {
            types: types.iter().map(|t| t.to_string()).collect(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn strips_stop_words_case_insensitively() {
        assert_eq!(lexicon().query_text("What is THE Eiffel Tower"), "Eiffel Tower");
        assert_eq!(lexicon().query_text("what is a"), "");
    }

    #[test]
    fn maps_types_to_topics() {
        let lex = lexicon();
        let cases = [
            (vec!["Thing", "Person"], KnowledgeTopic::Person),
            (vec!["TVSeries"], KnowledgeTopic::MovieTv),
            (vec!["Book", "CreativeWork"], KnowledgeTopic::Book),
            (vec!["Place"], KnowledgeTopic::Place),
            (vec!["VideoGameSeries"], KnowledgeTopic::VideoGame),
            (vec!["Thing"], KnowledgeTopic::General),
        ];
        for (types, expected) in cases {
            let answer = lex
                .classify("who is it", &entity(&types, Some("Something")))
                .unwrap();
            assert_eq!(answer.topic, expected, "{types:?}");
        }
    }

    #[test]
    fn animal_descriptions_override_types() {
        let answer = lexicon()
            .classify("is it a shark", &entity(&["Thing"], Some("Fish")))
            .unwrap();
        assert_eq!(answer.topic, KnowledgeTopic::Animal);
        assert_eq!(answer.description, "Fish");
    }

    #[test]
    fn profanity_wins_over_everything() {
        let lex = lexicon();
        let hit = entity(&["Person"], Some("Singer"));
        assert_eq!(lex.classify("DARN singer", &hit).unwrap().topic, KnowledgeTopic::NoRepeat);
        assert_eq!(lex.classify("f*** it", &hit).unwrap().topic, KnowledgeTopic::NoRepeat);
    }

    #[test]
    fn missing_description_is_no_hit() {
        assert_eq!(lexicon().classify("x", &entity(&["Person"], None)), None);
        assert_eq!(lexicon().classify("x", &entity(&["Person"], Some("  "))), None);
    }

    #[test]
    fn dont_know_script_depends_on_profanity() {
        assert_eq!(lexicon().dont_know_script("tell me a joke"), "dontknow_repeat");
        assert_eq!(lexicon().dont_know_script("darn joke"), "dontknow_norepeat");
    }

    #[test]
    fn loads_word_lists() {
        let lex = Lexicon::from_json(r#"{"stopWords": ["The"]}"#, r#"{"badwords": ["Darn"]}"#)
            .unwrap();
        assert_eq!(lex.query_text("the moon"), "moon");
        assert!(lex.is_profane("darn"));
    }
}
