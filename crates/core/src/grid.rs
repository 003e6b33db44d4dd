//! Grid module - the board model
//!
//! The grid is a `cols x rows` array of colour values where 0 means empty and
//! 1..=15 is the colour of the piece that filled the cell.
//! Uses a flat vector in row-major order (y * cols + x).
//! Coordinates: (x, y) where x is the column (left to right) and y the row
//! (top to bottom). Anchor arithmetic can step outside the grid near the
//! edges, so lookups take signed coordinates and report `None` instead of
//! panicking.

use tracing::debug;

use crate::pieces::GamePiece;
use crate::types::{BlockCoord, PIECE_COUNT};

/// Value of an empty cell
pub const EMPTY: u8 = 0;

/// The game grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: u8,
    rows: u8,
    /// Flat array of cells, row-major order
    cells: Vec<u8>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols as usize * rows as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.cols as i32 || y < 0 || y >= self.rows as i32 {
            return None;
        }
        Some(y as usize * self.cols as usize + x as usize)
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Get cell value at (x, y).
    /// Returns None if out of bounds; never confused with a real value.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell value at (x, y).
    ///
    /// Callers are expected to pass validated coordinates; debug builds
    /// assert it. Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> bool {
        debug_assert!(value <= PIECE_COUNT, "cell value {value} out of range");
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => {
                debug_assert!(false, "set({x}, {y}) outside {}x{} grid", self.cols, self.rows);
                false
            }
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(EMPTY)
    }

    /// Check whether `piece` fits with its centre at (anchor_x, anchor_y).
    ///
    /// The matrix's top-left corner lands on (anchor_x - 1, anchor_y - 1).
    /// Every occupied cell must hit an in-bounds empty cell. Pure.
    pub fn can_place(&self, piece: &GamePiece, anchor_x: i32, anchor_y: i32) -> bool {
        for (dx, dy) in piece.occupied() {
            let fits = offset(anchor_x, dx)
                .zip(offset(anchor_y, dy))
                .is_some_and(|(x, y)| self.is_empty_at(x, y));
            if !fits {
                debug!(piece = %piece, anchor_x, anchor_y, dx, dy, "placement blocked");
                return false;
            }
        }
        true
    }

    /// Write `piece` into the grid with its centre at (anchor_x, anchor_y).
    ///
    /// Re-validates first. An illegal placement is a silent no-op that
    /// leaves the grid untouched and returns false.
    pub fn place(&mut self, piece: &GamePiece, anchor_x: i32, anchor_y: i32) -> bool {
        if !self.can_place(piece, anchor_x, anchor_y) {
            return false;
        }

        let value = piece.value();
        for (dx, dy) in piece.occupied() {
            if let (Some(x), Some(y)) = (offset(anchor_x, dx), offset(anchor_y, dy)) {
                self.set(x, y, value);
            }
        }
        debug!(piece = %piece, anchor_x, anchor_y, "placed piece");
        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: u8) -> bool {
        if y >= self.rows {
            return false;
        }
        let start = y as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize]
            .iter()
            .all(|&v| v != EMPTY)
    }

    /// Check if a column is completely filled
    pub fn is_column_full(&self, x: u8) -> bool {
        if x >= self.cols {
            return false;
        }
        (0..self.rows).all(|y| self.get(x as i32, y as i32) != Some(EMPTY))
    }

    /// Zero a single cell given as a validated coordinate
    pub fn clear_cell(&mut self, coord: BlockCoord) {
        self.set(coord.x as i32, coord.y as i32, EMPTY);
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY).count()
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Copy rows into a nested vector, one inner vector per row
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols.max(1) as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

/// Grid coordinate of matrix cell `d` for a piece centred on `anchor`.
/// None when it falls outside the i32 range.
fn offset(anchor: i32, d: u8) -> Option<i32> {
    i32::try_from(anchor as i64 - 1 + d as i64).ok()
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_COLS, crate::types::DEFAULT_ROWS)
    }
}
