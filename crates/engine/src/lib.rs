//! Engine module - the game loop with a real turn deadline
//!
//! [`tetrecs_core::GameState`] decides what happens; this crate decides when.
//! It runs the per-turn countdown on tokio, serializes player actions with
//! deadline expiry, and streams every [`GameEvent`](types::GameEvent) to the
//! presentation side over one channel.
//!
//! # Example
//!
//! ```no_run
//! use tetrecs_core::{GameConfig, Listeners};
//! use tetrecs_engine::{run_listeners, GameLoop};
//!
//! # async fn demo() {
//! let (game, rx) = GameLoop::new(GameConfig::default());
//!
//! let mut listeners = Listeners::new();
//! listeners.on_loop_tick(|ms| println!("{ms}ms to place"));
//! listeners.on_game_over(|score| println!("final score {score}"));
//! let presentation = tokio::spawn(run_listeners(rx, listeners));
//!
//! game.start();
//! game.rotate_current(1);
//! game.block_clicked(2, 2);
//! // ... the deadline keeps running until the player places again
//! game.stop();
//! let _listeners = presentation.await;
//! # }
//! ```

pub mod deadline;
pub mod game_loop;

pub use tetrecs_core as core;
pub use tetrecs_types as types;

pub use deadline::DeadlineTimer;
pub use game_loop::{run_listeners, EventReceiver, EventSender, GameLoop, TurnPlan};
