//! The loaded, cross-checked static data a game runs on.

use crate::category::{Category, EvaluationMode, Evaluator};
use crate::corpus::{AnimalCorpus, SizeCorpus};
use crate::error::DomainError;
use crate::grammar::{keys, Grammar};
use crate::knowledge::Lexicon;
use crate::AnswerResult;

/// Results a category can produce, and so must be phrased by the grammar.
pub fn phrased_results(category: Category) -> &'static [AnswerResult] {
    use AnswerResult::*;
    match category.evaluator() {
        Evaluator::SizeComparison | Evaluator::Guess(EvaluationMode::YesNo) => {
            &[True, False, Possible, Sometimes]
        }
        Evaluator::Guess(EvaluationMode::Countries) => &[True, False, Possible],
        Evaluator::Guess(_) => &[True, False],
    }
}

/// Corpora, grammar and word lists, validated against each other.
#[derive(Debug, Clone)]
pub struct GameData {
    animals: AnimalCorpus,
    sizes: SizeCorpus,
    grammar: Grammar,
    lexicon: Lexicon,
}

impl GameData {
    /// Bundle the data, checking that the grammar can phrase everything the
    /// game may say.
    pub fn new(
        animals: AnimalCorpus,
        sizes: SizeCorpus,
        grammar: Grammar,
        lexicon: Lexicon,
    ) -> Result<Self, DomainError> {
        let missing_scripts: Vec<&str> = keys::all_keys()
            .into_iter()
            .filter(|key| !grammar.has_script(key))
            .collect();
        if !missing_scripts.is_empty() {
            return Err(DomainError::validation(format!(
                "grammar is missing scripts: {}",
                missing_scripts.join(", ")
            )));
        }

        let phrasing = &grammar;
        let missing_answers: Vec<String> = Category::ALL
            .into_iter()
            .flat_map(|category| {
                phrased_results(category)
                    .iter()
                    .filter(move |result| !phrasing.has_answer(category, **result))
                    .map(move |result| format!("{category}.{result}"))
            })
            .collect();
        if !missing_answers.is_empty() {
            return Err(DomainError::validation(format!(
                "grammar is missing answers: {}",
                missing_answers.join(", ")
            )));
        }

        Ok(Self {
            animals,
            sizes,
            grammar,
            lexicon,
        })
    }

    pub fn animals(&self) -> &AnimalCorpus {
        &self.animals
    }

    pub fn sizes(&self) -> &SizeCorpus {
        &self.sizes
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}
