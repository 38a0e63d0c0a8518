//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod corpus_loader;
pub mod game_log;
pub mod knowledge_graph;
pub mod ports;
pub mod session_store;
pub mod ssml;
