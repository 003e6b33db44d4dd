//! Game state module - the turn state machine
//!
//! This module ties together the grid, the piece spawner and scoring. It
//! decides what a placement, a missed deadline, a rotation or a swap does to
//! the game, and reports every change as a [`GameEvent`].
//!
//! It owns no timer. Whoever drives it (the async engine, a test, a replay)
//! is told the deadline through `LoopTick` events and calls
//! [`GameState::deadline_expired`] when that time runs out.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::clear::{clear_full_lines, ClearResult};
use crate::grid::Grid;
use crate::pieces::GamePiece;
use crate::rng::PieceSpawner;
use crate::scoring::Progress;
use crate::snapshot::GameSnapshot;
use crate::types::{GameEvent, PlacementOutcome, DEFAULT_COLS, DEFAULT_ROWS, STARTING_LIVES};

/// Events produced by one transition, in delivery order
pub type Events = ArrayVec<GameEvent, 6>;

/// Game setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameConfig {
    pub cols: u8,
    pub rows: u8,
    pub lives: u32,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            lives: STARTING_LIVES,
            seed: 1,
        }
    }
}

/// Lifecycle of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Created, not yet started
    Idle,
    /// Accepting placements, deadline running
    Running,
    /// Lives exhausted
    GameOver,
    /// Torn down mid-game
    Stopped,
}

impl Phase {
    /// No transition leaves a finished phase
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Stopped)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    spawner: PieceSpawner,
    current: Option<GamePiece>,
    following: Option<GamePiece>,
    progress: Progress,
    phase: Phase,
    /// Successful placements this game
    placements: u32,
    last_clear: Option<ClearResult>,
}

impl GameState {
    /// Create a new game with a seeded random spawner
    pub fn new(config: GameConfig) -> Self {
        Self::with_spawner(config, PieceSpawner::new(config.seed))
    }

    /// Create a new game drawing pieces from `spawner`
    pub fn with_spawner(config: GameConfig, spawner: PieceSpawner) -> Self {
        Self {
            config,
            grid: Grid::new(config.cols, config.rows),
            spawner,
            current: None,
            following: None,
            progress: Progress::new(config.lives),
            phase: Phase::Idle,
            placements: 0,
            last_clear: None,
        }
    }

    /// Start the game: spawn the opening pair and announce the first deadline
    pub fn start(&mut self) -> Events {
        let mut events = Events::new();
        if self.phase != Phase::Idle {
            return events;
        }

        info!(cols = self.grid.cols(), rows = self.grid.rows(), "starting game");
        self.current = Some(self.spawner.spawn());
        self.following = Some(self.spawner.spawn());
        self.phase = Phase::Running;

        events.push(self.next_piece_event());
        events.push(self.loop_tick_event());
        events
    }

    /// Handle the player choosing grid cell (x, y) as the anchor for the
    /// current piece.
    ///
    /// A legal anchor commits the piece, clears lines, scores, advances the
    /// pieces and announces a fresh deadline. An illegal one only produces
    /// `Rejected`; nothing else changes and the running deadline stands.
    pub fn block_clicked(&mut self, x: i32, y: i32) -> (PlacementOutcome, Events) {
        let mut events = Events::new();
        let Some(piece) = self.current.filter(|_| self.phase == Phase::Running) else {
            debug!(x, y, phase = ?self.phase, "placement ignored");
            return (PlacementOutcome::NotRunning, events);
        };

        if !self.grid.can_place(&piece, x, y) {
            debug!(piece = %piece, x, y, "placement rejected");
            events.push(GameEvent::Rejected);
            return (PlacementOutcome::Rejected, events);
        }

        let committed = self.grid.place(&piece, x, y);
        debug_assert!(committed, "can_place and place disagree");
        self.placements += 1;

        let clear = clear_full_lines(&mut self.grid);
        let points = self.progress.score(clear.lines, clear.blocks);
        info!(
            piece = %piece,
            x,
            y,
            lines = clear.lines,
            points,
            score = self.progress.score_value(),
            "placed piece"
        );

        if points > 0 {
            events.push(GameEvent::ScoreChanged {
                score: self.progress.score_value(),
                level: self.progress.level(),
                multiplier: self.progress.multiplier(),
            });
        }
        events.push(GameEvent::LineCleared {
            cells: clear.cells.clone(),
        });

        self.advance_pieces();
        events.push(self.next_piece_event());
        events.push(self.loop_tick_event());
        events.push(GameEvent::Placed);

        let outcome = PlacementOutcome::Placed {
            lines: clear.lines,
            blocks: clear.blocks,
            points,
        };
        self.last_clear = Some(clear);
        (outcome, events)
    }

    /// The turn deadline passed without a placement.
    ///
    /// With lives left this costs one life, resets the multiplier, replaces
    /// both pieces and announces a new deadline. With none left the game is
    /// over; that is reported exactly once.
    pub fn deadline_expired(&mut self) -> Events {
        let mut events = Events::new();
        if self.phase != Phase::Running {
            return events;
        }

        if self.progress.lose_life() {
            self.progress.reset_multiplier();
            self.current = Some(self.spawner.spawn());
            self.following = Some(self.spawner.spawn());
            info!(lives = self.progress.lives(), "deadline missed, life lost");

            events.push(GameEvent::LifeLost {
                lives: self.progress.lives(),
            });
            events.push(self.next_piece_event());
            events.push(self.loop_tick_event());
        } else {
            self.phase = Phase::GameOver;
            info!(score = self.progress.score_value(), "game over");
            events.push(GameEvent::GameOver {
                score: self.progress.score_value(),
            });
        }
        events
    }

    /// Rotate the current piece clockwise by `quarter_turns`.
    /// Does not use up the turn. Returns false when there is no live piece.
    pub fn rotate_current(&mut self, quarter_turns: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        match self.current.as_mut() {
            Some(piece) => {
                piece.rotate(quarter_turns);
                true
            }
            None => false,
        }
    }

    /// Exchange the current and following pieces. Does not use up the turn.
    pub fn swap(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        debug!("swapping current and following pieces");
        std::mem::swap(&mut self.current, &mut self.following);
        true
    }

    /// End the game immediately. Produces no events.
    pub fn stop(&mut self) {
        if !self.phase.is_finished() {
            info!(phase = ?self.phase, "stopping game");
            self.phase = Phase::Stopped;
        }
    }

    /// Return to a fresh, idle game with the same configuration.
    /// The spawner keeps its position so a new game gets new pieces.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.current = None;
        self.following = None;
        self.progress = Progress::new(self.config.lives);
        self.phase = Phase::Idle;
        self.placements = 0;
        self.last_clear = None;
    }

    fn advance_pieces(&mut self) {
        debug!(current = ?self.current.map(|p| p.kind()), "advancing pieces");
        self.current = self.following.take();
        self.following = Some(self.spawner.spawn());
    }

    fn next_piece_event(&self) -> GameEvent {
        let current = self.current.unwrap_or_else(|| GamePiece::create(0));
        let following = self.following.unwrap_or_else(|| GamePiece::create(0));
        GameEvent::NextPiece {
            current: current.view(),
            following: following.view(),
        }
    }

    fn loop_tick_event(&self) -> GameEvent {
        GameEvent::LoopTick {
            delay_ms: self.deadline_ms(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for setting up positions in tests and tools
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn current(&self) -> Option<GamePiece> {
        self.current
    }

    pub fn following(&self) -> Option<GamePiece> {
        self.following
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn score(&self) -> u32 {
        self.progress.score_value()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn multiplier(&self) -> u32 {
        self.progress.multiplier()
    }

    pub fn lives(&self) -> u32 {
        self.progress.lives()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    pub fn pieces_spawned(&self) -> u64 {
        self.spawner.spawned()
    }

    /// Cells cleared by the most recent placement
    pub fn last_clear(&self) -> Option<&ClearResult> {
        self.last_clear.as_ref()
    }

    /// Turn deadline at the current level
    pub fn deadline_ms(&self) -> u32 {
        self.progress.deadline_ms()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            board: self.grid.to_rows(),
            current: self.current.map(|p| p.view()),
            following: self.following.map(|p| p.view()),
            score: self.score(),
            level: self.level(),
            multiplier: self.multiplier(),
            lives: self.lives(),
            phase: self.phase,
            deadline_ms: self.deadline_ms(),
            placements: self.placements,
            seed: self.spawner.seed(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
