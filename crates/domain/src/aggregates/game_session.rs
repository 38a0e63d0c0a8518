//! GameSession aggregate - one player's rounds, budget and answer log.
//!
//! # Phases
//!
//! ```text
//! AwaitingStart -> RoundActive <-> AwaitingFallback
//!                      |
//!                      v
//!                  RoundOver -> RoundActive (play again)
//!
//! any -> SessionEnded (quit)
//! ```
//!
//! The aggregate is plain data that travels with every turn. All transitions
//! go through the methods below; nothing outside this module flips flags.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::DomainError;
use crate::events::{GuessOutcome, HintOutcome, QuestionBudget, RoundEnded, RoundStarted};
use crate::grammar::keys;
use crate::ids::{AnimalIndex, SessionId};
use crate::random::pick_index;
use crate::AnswerResult;

/// Questions a player may spend per round.
pub const QUESTION_BUDGET: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    AwaitingStart,
    RoundActive,
    /// A knowledge lookup is in flight for the current question
    AwaitingFallback,
    RoundOver,
    SessionEnded,
}

/// Polarity of the most recent answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerPolarity {
    Yes,
    No,
    Neither,
    GuessedCorrect,
    GuessedWrong,
}

impl From<AnswerResult> for AnswerPolarity {
    fn from(result: AnswerResult) -> Self {
        match result {
            AnswerResult::True => Self::Yes,
            AnswerResult::False => Self::No,
            _ => Self::Neither,
        }
    }
}

/// One answered question in the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub category: Category,
    /// The player's literal guess, e.g. "leaves" or "bigger than a dog"
    pub guess: String,
    pub result: AnswerResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundKind {
    /// Welcome: forget which animals were played
    FreshSession,
    /// Play again within the same play session
    NextRound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    session_id: SessionId,
    phase: SessionPhase,
    round: u32,
    animal: Option<AnimalIndex>,
    already_played: BTreeSet<AnimalIndex>,
    category_history: Vec<Category>,
    answers_found: Vec<AnswerRecord>,
    questions_asked: u32,
    got_hint: bool,
    current_answer: AnswerPolarity,
    won_round: bool,
}

impl GameSession {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            phase: SessionPhase::AwaitingStart,
            round: 0,
            animal: None,
            already_played: BTreeSet::new(),
            category_history: Vec::new(),
            answers_found: Vec::new(),
            questions_asked: 0,
            got_hint: false,
            current_answer: AnswerPolarity::Neither,
            won_round: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// The mystery animal of the current (or just finished) round.
    pub fn animal(&self) -> Option<AnimalIndex> {
        self.animal
    }

    pub fn already_played(&self) -> &BTreeSet<AnimalIndex> {
        &self.already_played
    }

    /// Every category asked about since the session began.
    pub fn category_history(&self) -> &[Category] {
        &self.category_history
    }

    pub fn answers_found(&self) -> &[AnswerRecord] {
        &self.answers_found
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn remaining_questions(&self) -> u32 {
        QUESTION_BUDGET.saturating_sub(self.questions_asked)
    }

    pub fn got_hint(&self) -> bool {
        self.got_hint
    }

    pub fn current_answer(&self) -> AnswerPolarity {
        self.current_answer
    }

    pub fn won_round(&self) -> bool {
        self.won_round
    }

    /// True once the current round can no longer take questions.
    pub fn round_over(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::RoundOver | SessionPhase::SessionEnded | SessionPhase::AwaitingStart
        )
    }

    /// "1 question" / "7 questions", as spoken in the closing lines.
    pub fn questions_asked_phrase(&self) -> String {
        match self.questions_asked {
            1 => "1 question".to_string(),
            n => format!("{n} questions"),
        }
    }

    // =========================================================================
    // Round lifecycle
    // =========================================================================

    /// Start a round with an animal not yet played this play session.
    ///
    /// `roll` returns a value in the inclusive range it is given.
    pub fn start_round<R>(
        &mut self,
        kind: RoundKind,
        animal_count: usize,
        roll: &mut R,
    ) -> Result<RoundStarted, DomainError>
    where
        R: FnMut(i32, i32) -> i32 + ?Sized,
    {
        if animal_count == 0 {
            return Err(DomainError::validation("cannot start a round without animals"));
        }

        let abandoned = if self.is_round_in_play() {
            self.finish_round(false)
        } else {
            None
        };

        match kind {
            RoundKind::FreshSession => {
                self.already_played.clear();
                self.round = 1;
            }
            RoundKind::NextRound => self.round += 1,
        }
        self.already_played.retain(|index| index.get() < animal_count);

        let mut pool: Vec<AnimalIndex> = (0..animal_count)
            .map(AnimalIndex::new)
            .filter(|index| !self.already_played.contains(index))
            .collect();
        let pool_recycled = pool.is_empty();
        if pool_recycled {
            self.already_played.clear();
            pool = (0..animal_count).map(AnimalIndex::new).collect();
        }

        let animal = pick_index(roll, pool.len())
            .and_then(|i| pool.get(i).copied())
            .ok_or_else(|| DomainError::invalid_state_transition("animal pool is empty"))?;

        self.phase = SessionPhase::RoundActive;
        self.animal = Some(animal);
        self.answers_found.clear();
        self.questions_asked = 0;
        self.got_hint = false;
        self.current_answer = AnswerPolarity::Neither;
        self.won_round = false;

        Ok(RoundStarted {
            round: self.round,
            animal,
            fresh_session: kind == RoundKind::FreshSession,
            pool_recycled,
            abandoned,
        })
    }

    /// Spend one question.
    ///
    /// The question that spends the last of the budget ends the round as a
    /// loss, whatever it was.
    pub fn consume_question(&mut self) -> QuestionBudget {
        if self.phase != SessionPhase::RoundActive {
            return QuestionBudget::RoundAlreadyOver;
        }
        if self.questions_asked < QUESTION_BUDGET {
            self.questions_asked += 1;
        }

        let remaining = self.remaining_questions();
        if remaining == 0 {
            return match self.finish_round(false) {
                Some(ended) => QuestionBudget::Exhausted(ended),
                None => QuestionBudget::RoundAlreadyOver,
            };
        }
        QuestionBudget::Continue {
            milestone: keys::milestone(remaining).map(|_| remaining),
        }
    }

    /// Log an answered question and update the answer polarity.
    pub fn record_answer(&mut self, record: AnswerRecord) {
        self.current_answer = record.result.into();
        self.category_history.push(record.category);
        self.answers_found.push(record);
    }

    /// Mark a turn that produced no yes/no answer.
    pub fn mark_neither(&mut self) {
        self.current_answer = AnswerPolarity::Neither;
    }

    /// Judge a guess at the animal's name. Exact, case-sensitive.
    pub fn guess_animal(&mut self, guess: &str, animal_name: &str) -> GuessOutcome {
        if guess == animal_name {
            if let Some(ended) = self.finish_round(true) {
                self.current_answer = AnswerPolarity::GuessedCorrect;
                return GuessOutcome::Correct(ended);
            }
        }
        self.current_answer = AnswerPolarity::GuessedWrong;
        GuessOutcome::Wrong
    }

    pub fn take_hint(&mut self) -> HintOutcome {
        self.current_answer = AnswerPolarity::Neither;
        if self.got_hint {
            HintOutcome::AlreadyGiven
        } else {
            self.got_hint = true;
            HintOutcome::Given
        }
    }

    /// End the round, won or lost. Fails if no round is in play.
    pub fn end_round(&mut self, won: bool) -> Result<RoundEnded, DomainError> {
        self.finish_round(won)
            .ok_or_else(|| DomainError::invalid_state_transition("no round is in play"))
    }

    /// Leave the game. An active round is lost.
    pub fn quit(&mut self) -> Option<RoundEnded> {
        let ended = self.finish_round(false);
        self.phase = SessionPhase::SessionEnded;
        ended
    }

    // =========================================================================
    // Knowledge fallback
    // =========================================================================

    pub fn begin_fallback(&mut self) -> Result<(), DomainError> {
        if self.phase != SessionPhase::RoundActive {
            return Err(DomainError::invalid_state_transition(format!(
                "cannot await a lookup from {:?}",
                self.phase
            )));
        }
        self.phase = SessionPhase::AwaitingFallback;
        self.current_answer = AnswerPolarity::Neither;
        Ok(())
    }

    /// Resolve the lookup sub-state, whatever the lookup's outcome.
    pub fn finish_fallback(&mut self) {
        if self.phase == SessionPhase::AwaitingFallback {
            self.phase = SessionPhase::RoundActive;
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn is_round_in_play(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::RoundActive | SessionPhase::AwaitingFallback
        )
    }

    fn finish_round(&mut self, won: bool) -> Option<RoundEnded> {
        if !self.is_round_in_play() {
            return None;
        }
        let animal = self.animal?;
        self.already_played.insert(animal);
        self.won_round = won;
        self.phase = SessionPhase::RoundOver;
        Some(RoundEnded {
            round: self.round,
            animal,
            questions_asked: self.questions_asked,
            won,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(SessionId::new("session-1"))
    }

    fn first(_: i32, _: i32) -> i32 {
        0
    }

    fn active(animal_count: usize) -> GameSession {
        let mut s = session();
        s.start_round(RoundKind::FreshSession, animal_count, &mut first)
            .unwrap();
        s
    }

    fn record(category: Category, result: AnswerResult) -> AnswerRecord {
        AnswerRecord {
            category,
            guess: "leaves".to_string(),
            result,
        }
    }

    #[test]
    fn new_session_awaits_start() {
        let s = session();
        assert_eq!(s.phase(), SessionPhase::AwaitingStart);
        assert!(s.round_over());
        assert_eq!(s.animal(), None);
    }

    #[test]
    fn start_round_resets_round_state() {
        let mut s = active(3);
        s.consume_question();
        s.take_hint();
        s.record_answer(record(Category::Diet, AnswerResult::True));

        s.end_round(false).unwrap();
        let started = s.start_round(RoundKind::NextRound, 3, &mut first).unwrap();

        assert_eq!(started.round, 2);
        assert!(!started.fresh_session);
        assert_eq!(s.phase(), SessionPhase::RoundActive);
        assert_eq!(s.questions_asked(), 0);
        assert!(!s.got_hint());
        assert!(s.answers_found().is_empty());
        assert_eq!(s.category_history(), &[Category::Diet]);
        assert_eq!(s.current_answer(), AnswerPolarity::Neither);
    }

    #[test]
    fn played_animals_are_never_redrawn() {
        let mut s = active(4);
        let mut seen = vec![s.animal().unwrap()];
        // always draw the last of the remaining pool
        let mut last = |_: i32, max: i32| max;
        for _ in 0..3 {
            s.end_round(false).unwrap();
            s.start_round(RoundKind::NextRound, 4, &mut last).unwrap();
            let drawn = s.animal().unwrap();
            assert!(!seen.contains(&drawn), "{drawn} drawn twice");
            seen.push(drawn);
        }
        assert_eq!(s.already_played().len(), 3);
    }

    #[test]
    fn pool_recycles_once_every_animal_is_played() {
        let mut s = active(2);
        s.end_round(true).unwrap();
        s.start_round(RoundKind::NextRound, 2, &mut first).unwrap();
        s.end_round(true).unwrap();

        let started = s.start_round(RoundKind::NextRound, 2, &mut first).unwrap();
        assert!(started.pool_recycled);
        assert!(s.already_played().is_empty());
    }

    #[test]
    fn welcome_forgets_played_animals() {
        let mut s = active(5);
        s.end_round(false).unwrap();
        s.start_round(RoundKind::NextRound, 5, &mut first).unwrap();
        s.end_round(false).unwrap();
        assert_eq!(s.already_played().len(), 2);

        let started = s.start_round(RoundKind::FreshSession, 5, &mut first).unwrap();
        assert_eq!(started.round, 1);
        assert!(s.already_played().is_empty());
    }

    #[test]
    fn restarting_mid_round_abandons_it_as_a_loss() {
        let mut s = active(3);
        let old = s.animal().unwrap();
        s.consume_question();

        let started = s.start_round(RoundKind::NextRound, 3, &mut first).unwrap();
        let abandoned = started.abandoned.unwrap();
        assert_eq!(abandoned.animal, old);
        assert!(!abandoned.won);
        assert_eq!(abandoned.questions_asked, 1);
        assert!(s.already_played().contains(&old));
        assert_ne!(s.animal(), Some(old));
    }

    #[test]
    fn cannot_start_without_animals() {
        let mut s = session();
        assert!(s.start_round(RoundKind::FreshSession, 0, &mut first).is_err());
    }

    #[test]
    fn milestones_are_announced_at_fifteen_ten_five_and_one_remaining() {
        let mut s = active(1);
        let mut announced = Vec::new();
        for asked in 1..QUESTION_BUDGET {
            match s.consume_question() {
                QuestionBudget::Continue {
                    milestone: Some(left),
                } => {
                    assert_eq!(left, s.remaining_questions());
                    announced.push((asked, left));
                }
                QuestionBudget::Continue { milestone: None } => {}
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(announced, vec![(5, 15), (10, 10), (15, 5), (19, 1)]);
        assert_eq!(s.questions_asked(), 19);
        assert_eq!(s.phase(), SessionPhase::RoundActive);
    }

    #[test]
    fn twentieth_question_ends_the_round_as_a_loss() {
        let mut s = active(1);
        for _ in 0..19 {
            s.consume_question();
        }
        assert!(!s.round_over());
        assert_eq!(s.remaining_questions(), 1);

        let QuestionBudget::Exhausted(ended) = s.consume_question() else {
            panic!("budget should be exhausted");
        };
        assert!(!ended.won);
        assert_eq!(ended.questions_asked, QUESTION_BUDGET);
        assert!(s.round_over());
        assert_eq!(s.questions_asked(), QUESTION_BUDGET);
        assert!(s.already_played().contains(&ended.animal));
        assert_eq!(s.consume_question(), QuestionBudget::RoundAlreadyOver);
    }

    #[test]
    fn session_restored_at_full_budget_ends_on_the_next_question() {
        let mut s = active(1);
        for _ in 0..19 {
            s.consume_question();
        }
        let mut json = serde_json::to_value(&s).unwrap();
        json["questionsAsked"] = serde_json::json!(QUESTION_BUDGET);
        let mut restored: GameSession = serde_json::from_value(json).unwrap();

        assert!(matches!(
            restored.consume_question(),
            QuestionBudget::Exhausted(_)
        ));
        assert_eq!(restored.questions_asked(), QUESTION_BUDGET);
    }

    #[test]
    fn questions_after_the_round_ask_to_play_again() {
        let mut s = active(1);
        s.end_round(true).unwrap();
        assert_eq!(s.consume_question(), QuestionBudget::RoundAlreadyOver);
        assert_eq!(s.questions_asked(), 0);
    }

    #[test]
    fn correct_guess_wins_the_round() {
        let mut s = active(2);
        s.consume_question();
        let GuessOutcome::Correct(ended) = s.guess_animal("giraffe", "giraffe") else {
            panic!("guess should win");
        };
        assert!(ended.won);
        assert!(s.won_round());
        assert_eq!(s.current_answer(), AnswerPolarity::GuessedCorrect);
        assert!(s.already_played().contains(&ended.animal));
        assert_eq!(s.consume_question(), QuestionBudget::RoundAlreadyOver);
    }

    #[test]
    fn guesses_are_case_sensitive() {
        let mut s = active(1);
        assert_eq!(s.guess_animal("Giraffe", "giraffe"), GuessOutcome::Wrong);
        assert_eq!(s.current_answer(), AnswerPolarity::GuessedWrong);
        assert_eq!(s.phase(), SessionPhase::RoundActive);
    }

    #[test]
    fn only_the_first_hint_is_given() {
        let mut s = active(1);
        assert_eq!(s.take_hint(), HintOutcome::Given);
        assert_eq!(s.take_hint(), HintOutcome::AlreadyGiven);
        assert!(s.got_hint());
    }

    #[test]
    fn record_answer_sets_polarity() {
        let mut s = active(1);
        s.record_answer(record(Category::Diet, AnswerResult::True));
        assert_eq!(s.current_answer(), AnswerPolarity::Yes);
        s.record_answer(record(Category::Prey, AnswerResult::False));
        assert_eq!(s.current_answer(), AnswerPolarity::No);
        s.record_answer(record(Category::Pet, AnswerResult::Sometimes));
        assert_eq!(s.current_answer(), AnswerPolarity::Neither);
        assert_eq!(s.answers_found().len(), 3);
    }

    #[test]
    fn quit_loses_an_active_round_and_ends_the_session() {
        let mut s = active(1);
        let ended = s.quit().unwrap();
        assert!(!ended.won);
        assert_eq!(s.phase(), SessionPhase::SessionEnded);

        let mut over = active(1);
        over.end_round(true).unwrap();
        assert_eq!(over.quit(), None);
        assert!(over.won_round());
    }

    #[test]
    fn fallback_sub_state_returns_to_active() {
        let mut s = active(1);
        s.begin_fallback().unwrap();
        assert_eq!(s.phase(), SessionPhase::AwaitingFallback);
        assert!(!s.round_over());
        assert!(s.begin_fallback().is_err());

        s.finish_fallback();
        assert_eq!(s.phase(), SessionPhase::RoundActive);
    }

    #[test]
    fn end_round_requires_a_round_in_play() {
        let mut s = session();
        assert!(s.end_round(false).is_err());
    }

    #[test]
    fn questions_asked_phrase() {
        let mut s = active(1);
        s.consume_question();
        assert_eq!(s.questions_asked_phrase(), "1 question");
        s.consume_question();
        assert_eq!(s.questions_asked_phrase(), "2 questions");
    }

    #[test]
    fn session_state_round_trips_through_json() {
        let mut s = active(3);
        s.consume_question();
        s.record_answer(record(Category::Legs, AnswerResult::False));
        let json = serde_json::to_string(&s).unwrap();
        let back: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
