//! Question categories and the evaluation policy bound to each.
//!
//! The intent router resolves a player's question to one of these variants.
//! Every category carries its evaluation strategy, so adding a category forces
//! the match arms below to say how it is judged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The comparison strategy used to judge a guess against corpus truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Exact equality between guess and a numeric corpus value
    Count,
    /// Exact equality between guess and a textual corpus value
    SpecialCategories,
    /// Corpus value already encodes the verdict
    YesNo,
    /// Substring containment of the guess in the corpus text
    SpecialInfo,
    /// Substring containment of the guess in the corpus text
    Match,
    /// Like `Match`, but the "commonly found" sentinel is always possible
    Countries,
    /// `<more|less> than <n>` against a numeric corpus value
    CompareLegsNumber,
}

impl EvaluationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::SpecialCategories => "specialcategories",
            Self::YesNo => "yesno",
            Self::SpecialInfo => "specialinfo",
            Self::Match => "match",
            Self::Countries => "countries",
            Self::CompareLegsNumber => "comparelegsnumber",
        }
    }
}

/// Which engine answers a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluator {
    /// Answer Evaluation Engine with the given mode
    Guess(EvaluationMode),
    /// Size Comparison Engine
    SizeComparison,
}

/// Topic of a player's question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Diet,
    Prey,
    Predators,
    Behavior,
    Migrate,
    Hibernate,
    Poisonous,
    Endangered,
    Pet,
    Edible,
    Class,
    Nocturnal,
    LayEggs,
    FriendlySizeMass,
    Habitat,
    Countries,
    BodyParts,
    Colors,
    Legs,
    CompareLegs,
    CompareSize,
}

impl Category {
    pub const ALL: [Category; 21] = [
        Self::Diet,
        Self::Prey,
        Self::Predators,
        Self::Behavior,
        Self::Migrate,
        Self::Hibernate,
        Self::Poisonous,
        Self::Endangered,
        Self::Pet,
        Self::Edible,
        Self::Class,
        Self::Nocturnal,
        Self::LayEggs,
        Self::FriendlySizeMass,
        Self::Habitat,
        Self::Countries,
        Self::BodyParts,
        Self::Colors,
        Self::Legs,
        Self::CompareLegs,
        Self::CompareSize,
    ];

    /// Key used in the animal corpus and the response grammar.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diet => "diet",
            Self::Prey => "prey",
            Self::Predators => "predators",
            Self::Behavior => "behavior",
            Self::Migrate => "migrate",
            Self::Hibernate => "hibernate",
            Self::Poisonous => "poisonous",
            Self::Endangered => "endangered",
            Self::Pet => "pet",
            Self::Edible => "edible",
            Self::Class => "class",
            Self::Nocturnal => "nocturnal",
            Self::LayEggs => "layeggs",
            Self::FriendlySizeMass => "friendlysizemass",
            Self::Habitat => "habitat",
            Self::Countries => "countries",
            Self::BodyParts => "bodyparts",
            Self::Colors => "colors",
            Self::Legs => "legs",
            Self::CompareLegs => "comparelegs",
            Self::CompareSize => "comparesize",
        }
    }

    pub fn evaluator(&self) -> Evaluator {
        use EvaluationMode::*;
        match self {
            Self::Diet | Self::Prey | Self::Predators | Self::Habitat => Evaluator::Guess(Match),
            Self::BodyParts | Self::Colors => Evaluator::Guess(Match),
            Self::Behavior => Evaluator::Guess(SpecialInfo),
            Self::Migrate
            | Self::Hibernate
            | Self::Poisonous
            | Self::Endangered
            | Self::Pet
            | Self::Edible
            | Self::Nocturnal
            | Self::LayEggs => Evaluator::Guess(YesNo),
            Self::Class | Self::FriendlySizeMass => Evaluator::Guess(SpecialCategories),
            Self::Countries => Evaluator::Guess(Countries),
            Self::Legs => Evaluator::Guess(Count),
            Self::CompareLegs => Evaluator::Guess(CompareLegsNumber),
            Self::CompareSize => Evaluator::SizeComparison,
        }
    }

    /// The category whose corpus attribute holds this category's truth.
    ///
    /// Returns `None` for categories answered from outside the animal profile.
    pub fn attribute_source(&self) -> Option<Category> {
        match self {
            Self::CompareLegs => Some(Self::Legs),
            Self::CompareSize => None,
            other => Some(*other),
        }
    }

    /// Human-readable phrase used when suggesting what to ask next.
    pub fn friendly_name(&self) -> Option<&'static str> {
        match self {
            Self::Diet => Some("diet"),
            Self::Prey => Some("prey"),
            Self::Predators => Some("predators"),
            Self::Behavior => Some("behaviors"),
            Self::Migrate => Some("migration habits"),
            Self::Hibernate => Some("hibernation habits"),
            Self::Poisonous => Some("poisonousness"),
            Self::Endangered => Some("endangered species status"),
            Self::Pet => Some("likelihood of being a pet"),
            Self::Edible => Some("edibility"),
            Self::Class => Some("class"),
            Self::Nocturnal => Some("sleeping habits"),
            Self::LayEggs => Some("egg-laying"),
            Self::FriendlySizeMass => Some("size"),
            Self::Habitat => Some("habitat"),
            Self::CompareSize => Some("size compared to other animals"),
            Self::BodyParts => Some("body parts"),
            Self::Colors => Some("colors"),
            // Not offered as suggestions
            Self::Countries | Self::Legs | Self::CompareLegs => None,
        }
    }

    /// Categories that may be offered as a suggestion in reminders.
    pub fn suggestable() -> impl Iterator<Item = Category> {
        Self::ALL
            .into_iter()
            .filter(|category| category.friendly_name().is_some())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown category: {}", s)))
    }
}

/// Small-talk and how-to-play questions answered straight from a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MiscTopic {
    WhatCanIAsk,
    HowToPlay,
    WhoAreYou,
    HowAreYou,
    ThankYou,
}

impl MiscTopic {
    pub const ALL: [MiscTopic; 5] = [
        Self::WhatCanIAsk,
        Self::HowToPlay,
        Self::WhoAreYou,
        Self::HowAreYou,
        Self::ThankYou,
    ];

    pub fn script_key(&self) -> &'static str {
        match self {
            Self::WhatCanIAsk => "MISC_whatCanIAsk",
            Self::HowToPlay => "MISC_howToPlay",
            Self::WhoAreYou => "MISC_whoAreYou",
            Self::HowAreYou => "MISC_howAreYou",
            Self::ThankYou => "MISC_thankYou",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_round_trips_through_its_key() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().ok(), Some(category));
        }
    }

    #[test]
    fn serde_key_matches_corpus_key() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let err = "wingspan".parse::<Category>().unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[test]
    fn leg_comparison_reads_the_leg_count() {
        assert_eq!(Category::CompareLegs.attribute_source(), Some(Category::Legs));
        assert_eq!(
            Category::CompareLegs.evaluator(),
            Evaluator::Guess(EvaluationMode::CompareLegsNumber)
        );
        assert_eq!(Category::CompareSize.evaluator(), Evaluator::SizeComparison);
        assert_eq!(Category::CompareSize.attribute_source(), None);
    }

    #[test]
    fn suggestable_categories_all_have_friendly_names() {
        let suggestable: Vec<_> = Category::suggestable().collect();
        assert_eq!(suggestable.len(), 18);
        assert!(!suggestable.contains(&Category::Legs));
    }
}
