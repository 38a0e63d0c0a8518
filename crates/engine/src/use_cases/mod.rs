//! Use cases - User story orchestration.
//!
//! Use cases drive the domain aggregate through the infrastructure ports.

pub mod turn;

pub use turn::TurnUseCases;
