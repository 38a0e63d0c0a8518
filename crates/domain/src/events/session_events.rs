//! Game session domain events
//!
//! Returned from `GameSession` mutations so the engine can persist and phrase
//! what happened without re-deriving it from state.

use crate::ids::AnimalIndex;

/// A round began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStarted {
    pub round: u32,
    pub animal: AnimalIndex,
    /// A fresh play session (welcome) rather than "play again"
    pub fresh_session: bool,
    /// Every animal had been played, so the pool was refilled
    pub pool_recycled: bool,
    /// A round that was still active when this one started
    pub abandoned: Option<RoundEnded>,
}

/// A round finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundEnded {
    pub round: u32,
    pub animal: AnimalIndex,
    pub questions_asked: u32,
    pub won: bool,
}

/// Outcome of spending one question from the budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBudget {
    /// The question counts; `milestone` is the remaining count to announce, if any
    Continue { milestone: Option<u32> },
    /// The budget was already spent; the round ended as a loss
    Exhausted(RoundEnded),
    /// No round is active; the player should be asked to play again
    RoundAlreadyOver,
}

/// Outcome of naming the animal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct(RoundEnded),
    Wrong,
}

/// Outcome of asking for a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    /// First hint this round
    Given,
    /// A hint was already given
    AlreadyGiven,
}
