//! Pieces module - the fixed shape catalog and quarter-turn rotation
//!
//! Every piece is a 3x3 occupancy matrix indexed `[x][y]`. The centre cell
//! (1, 1) is the anchor a player points at when placing.

use tracing::debug;

use crate::types::{PieceKind, PieceView, PIECE_COUNT, PIECE_SIZE};

/// Occupancy matrix, indexed `[x][y]`
pub type Blocks = [[u8; PIECE_SIZE]; PIECE_SIZE];

/// Get the unrotated occupancy for a piece kind
pub fn base_blocks(kind: PieceKind) -> Blocks {
    match kind {
        PieceKind::Line => [[0, 0, 0], [1, 1, 1], [0, 0, 0]],
        PieceKind::C => [[0, 0, 0], [1, 1, 1], [1, 0, 1]],
        PieceKind::Plus => [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
        PieceKind::Dot => [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
        PieceKind::Square => [[1, 1, 0], [1, 1, 0], [0, 0, 0]],
        PieceKind::L => [[0, 0, 0], [1, 1, 1], [0, 0, 1]],
        PieceKind::J => [[0, 0, 1], [1, 1, 1], [0, 0, 0]],
        PieceKind::S => [[0, 0, 0], [0, 1, 1], [1, 1, 0]],
        PieceKind::Z => [[1, 1, 0], [0, 1, 1], [0, 0, 0]],
        PieceKind::T => [[1, 0, 0], [1, 1, 0], [1, 0, 0]],
        PieceKind::X => [[1, 0, 1], [0, 1, 0], [1, 0, 1]],
        PieceKind::Corner => [[0, 0, 0], [1, 1, 0], [1, 0, 0]],
        PieceKind::InverseCorner => [[1, 0, 0], [1, 1, 0], [0, 0, 0]],
        PieceKind::Double => [[0, 1, 0], [0, 1, 0], [0, 0, 0]],
        PieceKind::Triple => [[0, 1, 0], [0, 1, 0], [0, 1, 0]],
    }
}

/// Rotate a matrix one quarter turn clockwise
fn rotate_cw(blocks: &Blocks) -> Blocks {
    let mut rotated = [[0u8; PIECE_SIZE]; PIECE_SIZE];
    for (x, column) in blocks.iter().enumerate() {
        for (y, &value) in column.iter().enumerate() {
            rotated[PIECE_SIZE - 1 - y][x] = value;
        }
    }
    rotated
}

/// Get the occupancy of a kind after `rotation` clockwise quarter turns
pub fn get_blocks(kind: PieceKind, rotation: u8) -> Blocks {
    let mut blocks = base_blocks(kind);
    for _ in 0..rotation % 4 {
        blocks = rotate_cw(&blocks);
    }
    blocks
}

/// A live piece: catalog shape plus its current rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GamePiece {
    kind: PieceKind,
    rotation: u8,
    blocks: Blocks,
}

impl GamePiece {
    /// Create the piece with catalog id `id`.
    ///
    /// `id` must be below [`PIECE_COUNT`]; debug builds assert it, release
    /// builds wrap it into range.
    pub fn create(id: u8) -> Self {
        debug_assert!(id < PIECE_COUNT, "piece id {id} out of range");
        let kind = PieceKind::from_id(id % PIECE_COUNT).unwrap_or(PieceKind::Dot);
        Self::from_kind(kind)
    }

    pub fn from_kind(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            blocks: base_blocks(kind),
        }
    }

    /// Rotate clockwise by `quarter_turns` (3 turns = one turn left)
    pub fn rotate(&mut self, quarter_turns: u32) {
        let turns = (quarter_turns % 4) as u8;
        for _ in 0..turns {
            self.blocks = rotate_cw(&self.blocks);
        }
        self.rotation = (self.rotation + turns) % 4;
        debug!(piece = %self.kind, rotation = self.rotation, "rotated piece");
    }

    /// Return a rotated copy, leaving `self` untouched
    pub fn rotated(mut self, quarter_turns: u32) -> Self {
        self.rotate(quarter_turns);
        self
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn id(&self) -> u8 {
        self.kind.id()
    }

    /// Colour value written into the grid
    pub fn value(&self) -> u8 {
        self.kind.value()
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    /// Offsets `(dx, dy)` of every occupied cell, relative to the top-left
    /// corner of the matrix
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.blocks.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v > 0)
                .map(move |(y, _)| (x as u8, y as u8))
        })
    }

    /// Number of occupied cells
    pub fn size(&self) -> usize {
        self.occupied().count()
    }

    pub fn view(&self) -> PieceView {
        PieceView {
            kind: self.kind,
            rotation: self.rotation,
        }
    }
}

impl From<PieceView> for GamePiece {
    fn from(view: PieceView) -> Self {
        Self::from_kind(view.kind).rotated(view.rotation as u32)
    }
}

impl std::fmt::Display for GamePiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}
