//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the core rules, the async
//! engine and any presentation layer listening to game events.
//!
//! # Board Dimensions
//!
//! The default challenge board is a 5x5 grid. Columns are indexed by `x`
//! (left to right), rows by `y` (top to bottom).
//!
//! # Turn Deadline
//!
//! Each turn has a countdown. When it expires without a placement the player
//! loses a life. The countdown shrinks with the level:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DEADLINE_MS` | 12000 | Deadline at level 0 |
//! | `DEADLINE_STEP_MS` | 500 | Reduction per level |
//! | `MIN_DEADLINE_MS` | 2500 | Floor reached at level 19 |
//!
//! # Examples
//!
//! ```
//! use tetrecs_types::{PieceKind, BlockCoord, PIECE_COUNT};
//!
//! let dot = PieceKind::from_id(3).unwrap();
//! assert_eq!(dot, PieceKind::Dot);
//! assert_eq!(dot.value(), 4);
//! assert_eq!(PieceKind::from_name("inverse corner"), Some(PieceKind::InverseCorner));
//! assert_eq!(PIECE_COUNT, 15);
//!
//! let c = BlockCoord::new(2, 4);
//! assert_eq!((c.x, c.y), (2, 4));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default number of grid columns
pub const DEFAULT_COLS: u8 = 5;

/// Default number of grid rows
pub const DEFAULT_ROWS: u8 = 5;

/// Lives at the start of a game
pub const STARTING_LIVES: u32 = 3;

/// Number of shapes in the piece catalog
pub const PIECE_COUNT: u8 = 15;

/// Side length of every piece occupancy matrix
pub const PIECE_SIZE: usize = 3;

/// Points per cleared block, before lines and multiplier are applied
pub const POINTS_PER_BLOCK: u32 = 10;

/// Score needed per level
pub const POINTS_PER_LEVEL: u32 = 1000;

/// Turn deadline at level 0 (ms)
pub const BASE_DEADLINE_MS: u32 = 12_000;

/// Deadline reduction per level (ms)
pub const DEADLINE_STEP_MS: u32 = 500;

/// Shortest possible deadline (ms)
pub const MIN_DEADLINE_MS: u32 = 2_500;


/// The fifteen piece shapes of the catalog
///
/// The catalog id is the declaration order (0..=14) and the colour value
/// written into the grid is `id + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceKind {
    Line,
    C,
    Plus,
    Dot,
    Square,
    L,
    J,
    S,
    Z,
    T,
    X,
    Corner,
    InverseCorner,
    Double,
    Triple,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; PIECE_COUNT as usize] = [
        PieceKind::Line,
        PieceKind::C,
        PieceKind::Plus,
        PieceKind::Dot,
        PieceKind::Square,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::X,
        PieceKind::Corner,
        PieceKind::InverseCorner,
        PieceKind::Double,
        PieceKind::Triple,
    ];

    /// Look up a kind by catalog id
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Catalog id (0..=14)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Colour value written into the grid (1..=15)
    pub fn value(self) -> u8 {
        self.id() + 1
    }

    /// Parse a kind from its display name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrecs_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_name("plus"), Some(PieceKind::Plus));
    /// assert_eq!(PieceKind::from_name("Square"), Some(PieceKind::Square));
    /// assert_eq!(PieceKind::from_name("tetromino"), None);
    /// ```
    pub fn from_name(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|k| k.as_str() == wanted)
    }

    /// Lowercase display name
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::Line => "line",
            PieceKind::C => "c",
            PieceKind::Plus => "plus",
            PieceKind::Dot => "dot",
            PieceKind::Square => "square",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::X => "x",
            PieceKind::Corner => "corner",
            PieceKind::InverseCorner => "inverse corner",
            PieceKind::Double => "double",
            PieceKind::Triple => "triple",
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single grid cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockCoord {
    pub x: u8,
    pub y: u8,
}

impl BlockCoord {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// What a presentation layer needs to draw a piece: its kind and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceView {
    pub kind: PieceKind,
    /// Quarter turns clockwise (0..=3)
    pub rotation: u8,
}

/// Result of a placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlacementOutcome {
    /// The piece was committed and the turn advanced
    Placed {
        lines: u32,
        blocks: u32,
        points: u32,
    },
    /// The anchor was illegal; nothing changed
    Rejected,
    /// The game is not running (idle, over or stopped)
    NotRunning,
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed { .. })
    }
}

/// Notification delivered to presentation collaborators.
///
/// Events carry data only; a listener cannot reach back into game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Cells zeroed by a line clear (possibly empty)
    LineCleared { cells: BTreeSet<BlockCoord> },
    /// The current/following pair changed
    NextPiece {
        current: PieceView,
        following: PieceView,
    },
    /// A new deadline was scheduled
    LoopTick { delay_ms: u32 },
    /// A placement was committed
    Placed,
    /// A placement was refused
    Rejected,
    /// The deadline expired and a life was taken
    LifeLost { lives: u32 },
    /// Score, level or multiplier moved after a clear
    ScoreChanged {
        score: u32,
        level: u32,
        multiplier: u32,
    },
    /// Lives exhausted; emitted exactly once
    GameOver { score: u32 },
    /// Raised by the score keeper when the final score beats the table
    HighScore,
}

impl GameEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::LineCleared { .. } => "lineCleared",
            GameEvent::NextPiece { .. } => "nextPiece",
            GameEvent::LoopTick { .. } => "loopTick",
            GameEvent::Placed => "placed",
            GameEvent::Rejected => "rejected",
            GameEvent::LifeLost { .. } => "lifeLost",
            GameEvent::ScoreChanged { .. } => "scoreChanged",
            GameEvent::GameOver { .. } => "gameOver",
            GameEvent::HighScore => "highScore",
        }
    }
}
