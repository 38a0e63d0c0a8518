//! Domain Events
//!
//! Return types from aggregate mutations, communicating what happened when
//! session state was modified.

pub mod session_events;

pub use session_events::*;
