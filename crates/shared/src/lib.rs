//! Mystery Animal Shared - wire contract between the voice router and the engine
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde and the domain vocabulary
//! 2. **No business logic** - pure data types and serialization

pub mod sound;
pub mod turn;

pub use sound::SoundCue;
pub use turn::{ErrorResponse, TurnIntent, TurnRequest, TurnResponse};
