//! Runner configuration from environment variables
//!
//! - `TETRECS_COLS` / `TETRECS_ROWS`: grid size (default 5x5)
//! - `TETRECS_LIVES`: starting lives (default 3)
//! - `TETRECS_SEED`: piece seed (default: derived from the clock)
//! - `TETRECS_SCORES_PATH`: score file (default `scores.txt`)
//! - `TETRECS_PLAYER`: name recorded in the score file (default `player`)
//! - `TETRECS_THINK_MS`: autoplayer delay before each move (default 250)
//! - `TETRECS_LOG`: tracing filter (default `info`)
//!
//! Values that do not parse fall back to their defaults.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::GameConfig;
use crate::scores::DEFAULT_SCORES_FILE;
use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, STARTING_LIVES};

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub game: GameConfig,
    pub scores_path: PathBuf,
    pub player: String,
    pub think_ms: u64,
    pub log_filter: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            scores_path: PathBuf::from(DEFAULT_SCORES_FILE),
            player: "player".to_string(),
            think_ms: 250,
            log_filter: "info".to_string(),
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

impl RunnerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let game = GameConfig {
            cols: parsed("TETRECS_COLS").filter(|&c| c > 0).unwrap_or(DEFAULT_COLS),
            rows: parsed("TETRECS_ROWS").filter(|&r| r > 0).unwrap_or(DEFAULT_ROWS),
            lives: parsed("TETRECS_LIVES").unwrap_or(STARTING_LIVES),
            seed: parsed("TETRECS_SEED").unwrap_or_else(clock_seed),
        };

        Self {
            game,
            scores_path: non_empty("TETRECS_SCORES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.scores_path),
            player: non_empty("TETRECS_PLAYER").unwrap_or(defaults.player),
            think_ms: parsed("TETRECS_THINK_MS").unwrap_or(defaults.think_ms),
            log_filter: non_empty("TETRECS_LOG").unwrap_or(defaults.log_filter),
        }
    }
}
