//! Line-clear evaluation
//!
//! After a successful placement every full row and every full column is
//! collected into one coordinate set and zeroed. Cells sitting on both a full
//! row and a full column are cleared once, but each full line still counts.

use std::collections::BTreeSet;

use tracing::debug;

use crate::grid::Grid;
use crate::types::BlockCoord;

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearResult {
    /// Full rows plus full columns (not deduplicated)
    pub lines: u32,
    /// Distinct cells zeroed
    pub blocks: u32,
    /// The zeroed cells
    pub cells: BTreeSet<BlockCoord>,
}

impl ClearResult {
    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }
}

/// Full line indices found by a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullLines {
    pub rows: Vec<u8>,
    pub columns: Vec<u8>,
}

impl FullLines {
    pub fn count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }
}

/// Find full rows and columns without mutating the grid
pub fn find_full_lines(grid: &Grid) -> FullLines {
    FullLines {
        rows: (0..grid.rows()).filter(|&y| grid.is_row_full(y)).collect(),
        columns: (0..grid.cols()).filter(|&x| grid.is_column_full(x)).collect(),
    }
}

/// Scan, clear and report. Run only after a committed placement.
pub fn clear_full_lines(grid: &mut Grid) -> ClearResult {
    let full = find_full_lines(grid);

    let mut cells = BTreeSet::new();
    for &y in &full.rows {
        cells.extend((0..grid.cols()).map(|x| BlockCoord::new(x, y)));
    }
    for &x in &full.columns {
        cells.extend((0..grid.rows()).map(|y| BlockCoord::new(x, y)));
    }

    for &coord in &cells {
        grid.clear_cell(coord);
    }

    let lines = (full.rows.len() + full.columns.len()) as u32;
    if lines > 0 {
        debug!(
            rows = ?full.rows,
            columns = ?full.columns,
            blocks = cells.len(),
            "cleared lines"
        );
    }

    ClearResult {
        lines,
        blocks: cells.len() as u32,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, y: u8) {
        for x in 0..grid.cols() {
            grid.set(x as i32, y as i32, 1);
        }
    }

    #[test]
    fn test_single_row() {
        let mut grid = Grid::new(5, 5);
        fill_row(&mut grid, 2);
        grid.set(0, 0, 4);

        let result = clear_full_lines(&mut grid);
        assert_eq!(result.lines, 1);
        assert_eq!(result.blocks, 5);
        assert!(result.cells.iter().all(|c| c.y == 2));
        assert_eq!(grid.get(0, 0), Some(4));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_row_and_column_intersection_counts_both_lines() {
        let mut grid = Grid::new(5, 5);
        fill_row(&mut grid, 1);
        for y in 0..5 {
            grid.set(3, y, 2);
        }

        let result = clear_full_lines(&mut grid);
        assert_eq!(result.lines, 2);
        assert_eq!(result.blocks, 9);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_nothing_full() {
        let mut grid = Grid::new(5, 5);
        grid.set(1, 1, 1);
        let before = grid.clone();

        let result = clear_full_lines(&mut grid);
        assert!(result.is_empty());
        assert_eq!(result.blocks, 0);
        assert_eq!(grid, before);
    }
}
