//! Grid tests - placement legality and commit

use tetrecs::core::{GamePiece, Grid};
use tetrecs::types::{PieceKind, PIECE_COUNT};

/// Reference check written straight from the rule: every occupied cell must
/// land in range on an empty cell.
fn fits_by_rule(grid: &Grid, piece: &GamePiece, ax: i32, ay: i32) -> bool {
    let blocks = piece.blocks();
    for (dx, column) in blocks.iter().enumerate() {
        for (dy, &v) in column.iter().enumerate() {
            if v == 0 {
                continue;
            }
            let x = ax - 1 + dx as i32;
            let y = ay - 1 + dy as i32;
            if x < 0 || y < 0 || x >= grid.cols() as i32 || y >= grid.rows() as i32 {
                return false;
            }
            if grid.get(x, y) != Some(0) {
                return false;
            }
        }
    }
    true
}

fn cluttered_grid() -> Grid {
    let mut grid = Grid::new(5, 5);
    for &(x, y) in &[(0, 0), (2, 1), (4, 2), (1, 3), (3, 4)] {
        grid.set(x, y, 7);
    }
    grid
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(5, 5);
    assert_eq!(grid.cols(), 5);
    assert_eq!(grid.rows(), 5);
    for y in 0..5 {
        for x in 0..5 {
            assert_eq!(grid.get(x, y), Some(0), "cell ({x}, {y}) should be empty");
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new(5, 5);
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(5, 0), None);
    assert_eq!(grid.get(0, 5), None);
    assert_eq!(grid.get(i32::MAX, i32::MIN), None);
}

#[test]
fn test_can_place_matches_rule_everywhere() {
    let grid = cluttered_grid();
    for id in 0..PIECE_COUNT {
        for turns in 0..4 {
            let piece = GamePiece::create(id).rotated(turns);
            for ay in -2..8 {
                for ax in -2..8 {
                    assert_eq!(
                        grid.can_place(&piece, ax, ay),
                        fits_by_rule(&grid, &piece, ax, ay),
                        "{piece} rot {turns} at ({ax}, {ay})"
                    );
                }
            }
        }
    }
}

#[test]
fn test_can_place_is_pure() {
    let grid = cluttered_grid();
    let before = grid.clone();
    for id in 0..PIECE_COUNT {
        let piece = GamePiece::create(id);
        for ay in 0..5 {
            for ax in 0..5 {
                let _ = grid.can_place(&piece, ax, ay);
            }
        }
    }
    assert_eq!(grid, before);
}

#[test]
fn test_rejected_place_leaves_grid_unchanged() {
    let mut grid = cluttered_grid();
    for id in 0..PIECE_COUNT {
        let piece = GamePiece::create(id);
        for ay in -1..6 {
            for ax in -1..6 {
                if grid.can_place(&piece, ax, ay) {
                    continue;
                }
                let before = grid.cells().to_vec();
                assert!(!grid.place(&piece, ax, ay));
                assert_eq!(grid.cells(), &before[..]);
            }
        }
    }
}

#[test]
fn test_place_writes_colour_value() {
    let mut grid = Grid::new(5, 5);
    let plus = GamePiece::from_kind(PieceKind::Plus);
    assert!(grid.place(&plus, 2, 2));

    let value = PieceKind::Plus.value();
    for (x, y) in [(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)] {
        assert_eq!(grid.get(x, y), Some(value));
    }
    assert_eq!(grid.filled_count(), 5);

    // Overlapping the plus is refused
    assert!(!grid.can_place(&plus, 3, 2));
}

#[test]
fn test_clear_resets_all_cells() {
    let mut grid = cluttered_grid();
    grid.clear();
    assert_eq!(grid.filled_count(), 0);
    assert!(grid.cells().iter().all(|&v| v == 0));
}

#[test]
fn test_row_full() {
    let mut grid = Grid::new(4, 3);
    for x in 0..4 {
        grid.set(x, 1, 2);
    }
    assert!(grid.is_row_full(1));
    assert!(!grid.is_row_full(0));
    assert!(!grid.is_row_full(3));
}

#[test]
fn test_extreme_anchors_are_refused() {
    let mut grid = Grid::new(5, 5);
    let extremes = [i32::MIN, i32::MIN + 1, -1, 5, i32::MAX - 1, i32::MAX];
    for id in 0..PIECE_COUNT {
        let piece = GamePiece::create(id);
        for &ax in &extremes {
            for &ay in &extremes {
                assert!(!grid.can_place(&piece, ax, ay), "{piece} at ({ax}, {ay})");
                assert!(!grid.place(&piece, ax, ay));
            }
            assert!(!grid.can_place(&piece, ax, 2));
            assert!(!grid.can_place(&piece, 2, ax));
        }
    }
    assert_eq!(grid.filled_count(), 0);
}
