//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules and state transitions. It owns no
//! timer, thread or file, making it:
//!
//! - **Deterministic**: a seed (or a scripted spawner) fixes every piece
//! - **Testable**: every transition returns the events it produced
//! - **Portable**: the async engine, a replay tool or a test can drive it
//!
//! # Module Structure
//!
//! - [`grid`]: `cols x rows` board with placement legality and commit
//! - [`pieces`]: the fifteen-shape catalog and quarter-turn rotation
//! - [`clear`]: full row/column detection and clearing
//! - [`scoring`]: score, multiplier, level, lives and the turn deadline
//! - [`rng`]: uniform piece spawning
//! - [`game_state`]: the turn state machine
//! - [`listener`]: single-slot handlers for presentation collaborators
//! - [`snapshot`]: serializable read-only view of a game
//!
//! # Game Rules
//!
//! - A piece is placed by choosing the grid cell under its centre.
//! - Every full row and every full column is cleared after a placement.
//! - A clear scores `lines * blocks * 10 * multiplier`; scoring placements
//!   raise the multiplier, any other placement resets it.
//! - Each turn has a deadline of `max(2500, 12000 - 500 * level)` ms;
//!   missing it costs a life and both pieces. Missing it with no lives left
//!   ends the game.
//!
//! # Example
//!
//! ```
//! use tetrecs_core::{GameConfig, GameState, PieceSpawner};
//! use tetrecs_core::types::{PieceKind, PlacementOutcome};
//!
//! let spawner = PieceSpawner::scripted(vec![PieceKind::Dot.id()]);
//! let mut game = GameState::with_spawner(GameConfig::default(), spawner);
//! game.start();
//!
//! let (outcome, _events) = game.block_clicked(1, 1);
//! assert!(outcome.is_placed());
//! assert_eq!(game.grid().get(1, 1), Some(4));
//!
//! // The cell is taken now
//! let (outcome, _events) = game.block_clicked(1, 1);
//! assert_eq!(outcome, PlacementOutcome::Rejected);
//! ```

pub mod clear;
pub mod game_state;
pub mod grid;
pub mod listener;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetrecs_types as types;

// Re-export commonly used types for convenience
pub use clear::{clear_full_lines, find_full_lines, ClearResult};
pub use game_state::{Events, GameConfig, GameState, Phase};
pub use grid::Grid;
pub use listener::Listeners;
pub use pieces::{get_blocks, GamePiece};
pub use rng::{PieceSpawner, SimpleRng};
pub use scoring::{calculate_level, calculate_score, deadline_ms, Progress};
pub use snapshot::GameSnapshot;
