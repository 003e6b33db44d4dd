//! Autoplayer - picks a placement so the runner can play headless
//!
//! Greedy: among every rotation of the current piece (and, failing that, the
//! following piece) it picks the anchor that completes the most lines, the
//! first such anchor in row-major order on ties. When nothing fits it does
//! nothing and lets the deadline run out.

use std::time::Duration;

use tracing::debug;

use crate::core::{find_full_lines, GamePiece, GameState, Grid};
use crate::engine::{GameLoop, TurnPlan};

/// One decided move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Swap current and following first
    pub swap: bool,
    /// Clockwise quarter turns applied after any swap
    pub rotations: u32,
    pub x: i32,
    pub y: i32,
    /// Lines the placement completes
    pub lines: usize,
}

/// Best placement for `piece` on `grid`, if any
fn best_for(grid: &Grid, piece: GamePiece, swap: bool) -> Option<Move> {
    let mut best: Option<Move> = None;
    for rotations in 0..4 {
        let rotated = piece.rotated(rotations);
        for y in 0..grid.rows() as i32 {
            for x in 0..grid.cols() as i32 {
                if !grid.can_place(&rotated, x, y) {
                    continue;
                }
                let mut trial = grid.clone();
                trial.place(&rotated, x, y);
                let lines = find_full_lines(&trial).count();
                if best.map_or(true, |b| lines > b.lines) {
                    best = Some(Move {
                        swap,
                        rotations,
                        x,
                        y,
                        lines,
                    });
                }
            }
        }
    }
    best
}

/// Decide the next move for a running game
pub fn choose_move(state: &GameState) -> Option<Move> {
    let grid = state.grid();
    if let Some(m) = state.current().and_then(|p| best_for(grid, p, false)) {
        return Some(m);
    }
    state.following().and_then(|p| best_for(grid, p, true))
}

impl From<Move> for TurnPlan {
    fn from(m: Move) -> Self {
        TurnPlan {
            swap: m.swap,
            rotations: m.rotations,
            x: m.x,
            y: m.y,
        }
    }
}

/// Choose and play one move as a single turn. Returns whether a piece landed.
pub fn play(game: &GameLoop) -> bool {
    match game.play_turn(|state| choose_move(state).map(TurnPlan::from)) {
        Some((plan, outcome)) => {
            debug!(?plan, ?outcome, "autoplay move");
            outcome.is_placed()
        }
        None => false,
    }
}

/// Play until the game finishes, pausing `think` before each move.
pub async fn run(game: &GameLoop, think: Duration) {
    while !game.is_finished() {
        tokio::time::sleep(think).await;
        play(game);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PieceSpawner};
    use crate::types::PieceKind;

    #[test]
    fn prefers_completing_a_line() {
        let spawner = PieceSpawner::scripted(vec![PieceKind::Dot.id()]);
        let mut state = GameState::with_spawner(GameConfig::default(), spawner);
        for x in 0..4 {
            state.grid_mut().set(x, 3, 1);
        }
        state.start();

        let m = choose_move(&state).unwrap();
        assert_eq!((m.x, m.y, m.lines), (4, 3, 1));
        assert!(!m.swap);
    }

    #[test]
    fn swaps_when_only_following_fits() {
        let spawner = PieceSpawner::scripted(vec![PieceKind::Plus.id(), PieceKind::Dot.id()]);
        let mut state = GameState::with_spawner(GameConfig::default(), spawner);
        // Checkerboard: no room for a plus, plenty for a dot
        for y in 0..5 {
            for x in 0..5 {
                if (x + y) % 2 == 0 {
                    state.grid_mut().set(x, y, 1);
                }
            }
        }
        state.start();

        let m = choose_move(&state).unwrap();
        assert!(m.swap);
        assert_eq!(m.rotations, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn play_places_on_a_running_game() {
        let spawner = PieceSpawner::scripted(vec![PieceKind::Dot.id()]);
        let (game, _rx) = GameLoop::with_state(GameState::with_spawner(GameConfig::default(), spawner));
        assert!(!play(&game));

        game.start();
        assert!(play(&game));
        assert!(play(&game));
        assert_eq!(game.snapshot().filled_cells(), 2);
        game.stop();
    }

    #[test]
    fn nothing_fits_on_a_full_grid() {
        let mut state = GameState::default();
        for y in 0..5 {
            for x in 0..5 {
                state.grid_mut().set(x, y, 1);
            }
        }
        state.start();
        assert_eq!(choose_move(&state), None);
    }
}
