pub mod aggregates;
pub mod category;
pub mod comparison;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod events;
pub mod game_data;
pub mod grammar;
pub mod ids;
pub mod knowledge;
pub mod random;
pub mod reminder;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use aggregates::{
    AnswerPolarity, AnswerRecord, GameSession, RoundKind, SessionPhase, QUESTION_BUDGET,
};
pub use category::{Category, EvaluationMode, Evaluator, MiscTopic};
pub use comparison::{compare_size, CompareWord, SizeComparisonQuery, COMPARABLE_BAND};
pub use corpus::{
    AnimalCorpus, AnimalProfile, AttributeValue, CorpusError, SizeCorpus, SizeEntry,
    COMMONLY_FOUND,
};
pub use error::DomainError;
pub use evaluation::{check_guess, AnswerResult};
pub use events::{GuessOutcome, HintOutcome, QuestionBudget, RoundEnded, RoundStarted};
pub use game_data::GameData;
pub use grammar::{Grammar, GrammarError, TemplateVar, Variables};
pub use ids::{AnimalIndex, SessionId};
pub use knowledge::{KnowledgeAnswer, KnowledgeEntity, KnowledgeTopic, Lexicon};
pub use reminder::{idle_prompts, reminder_lines, PLAY_AGAIN_PROMPTS};
