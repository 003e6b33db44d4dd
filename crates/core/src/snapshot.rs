use serde::Serialize;

use crate::game_state::Phase;
use crate::types::PieceView;

/// Read-only copy of everything a presentation layer shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub cols: u8,
    pub rows: u8,
    /// One inner vector per row, top to bottom
    pub board: Vec<Vec<u8>>,
    pub current: Option<PieceView>,
    pub following: Option<PieceView>,
    pub score: u32,
    pub level: u32,
    pub multiplier: u32,
    pub lives: u32,
    pub phase: Phase,
    pub deadline_ms: u32,
    pub placements: u32,
    pub seed: u32,
}

impl GameSnapshot {
    /// Number of non-empty cells on the board
    pub fn filled_cells(&self) -> usize {
        self.board.iter().flatten().filter(|&&v| v != 0).count()
    }

    /// Board value at (x, y), if in range
    pub fn cell(&self, x: u8, y: u8) -> Option<u8> {
        self.board.get(y as usize)?.get(x as usize).copied()
    }
}
