//! Tetrecs (workspace facade crate).
//!
//! Re-exports the member crates under one name and hosts the pieces shared by
//! the runner binary: environment configuration and a simple autoplayer.

pub mod autoplay;
pub mod config;

pub use tetrecs_core as core;
pub use tetrecs_engine as engine;
pub use tetrecs_scores as scores;
pub use tetrecs_types as types;
