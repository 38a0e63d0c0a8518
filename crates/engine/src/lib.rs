//! Mystery Animal Engine library.
//!
//! This crate contains all server-side code for the Mystery Animal game.
//!
//! ## Structure
//!
//! - `use_cases/` - Turn handling on top of the domain session
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
