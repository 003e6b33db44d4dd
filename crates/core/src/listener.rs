//! Listener slots for presentation collaborators
//!
//! At most one handler per event kind, each optional. Handlers receive event
//! data only, so nothing registered here can mutate game state.

use std::collections::BTreeSet;

use crate::types::{BlockCoord, GameEvent, PieceView};

type LineClearedFn = Box<dyn FnMut(&BTreeSet<BlockCoord>) + Send>;
type NextPieceFn = Box<dyn FnMut(PieceView, PieceView) + Send>;
type LoopTickFn = Box<dyn FnMut(u32) + Send>;
type ScoreFn = Box<dyn FnMut(u32, u32, u32) + Send>;
type LivesFn = Box<dyn FnMut(u32) + Send>;
type GameOverFn = Box<dyn FnMut(u32) + Send>;
type SignalFn = Box<dyn FnMut() + Send>;

/// Registered handlers, one slot per event kind
#[derive(Default)]
pub struct Listeners {
    line_cleared: Option<LineClearedFn>,
    next_piece: Option<NextPieceFn>,
    loop_tick: Option<LoopTickFn>,
    score_changed: Option<ScoreFn>,
    life_lost: Option<LivesFn>,
    game_over: Option<GameOverFn>,
    high_score: Option<SignalFn>,
    placed: Option<SignalFn>,
    rejected: Option<SignalFn>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells just cleared
    pub fn on_line_cleared(&mut self, f: impl FnMut(&BTreeSet<BlockCoord>) + Send + 'static) {
        self.line_cleared = Some(Box::new(f));
    }

    /// New current/following pair
    pub fn on_next_piece(&mut self, f: impl FnMut(PieceView, PieceView) + Send + 'static) {
        self.next_piece = Some(Box::new(f));
    }

    /// New deadline, in milliseconds
    pub fn on_loop_tick(&mut self, f: impl FnMut(u32) + Send + 'static) {
        self.loop_tick = Some(Box::new(f));
    }

    /// Score, level and multiplier after a scoring placement
    pub fn on_score_changed(&mut self, f: impl FnMut(u32, u32, u32) + Send + 'static) {
        self.score_changed = Some(Box::new(f));
    }

    /// Lives remaining after a missed deadline
    pub fn on_life_lost(&mut self, f: impl FnMut(u32) + Send + 'static) {
        self.life_lost = Some(Box::new(f));
    }

    /// Final score
    pub fn on_game_over(&mut self, f: impl FnMut(u32) + Send + 'static) {
        self.game_over = Some(Box::new(f));
    }

    pub fn on_high_score(&mut self, f: impl FnMut() + Send + 'static) {
        self.high_score = Some(Box::new(f));
    }

    pub fn on_placed(&mut self, f: impl FnMut() + Send + 'static) {
        self.placed = Some(Box::new(f));
    }

    pub fn on_rejected(&mut self, f: impl FnMut() + Send + 'static) {
        self.rejected = Some(Box::new(f));
    }

    /// Call the handler registered for `event`, if any
    pub fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LineCleared { cells } => {
                if let Some(f) = self.line_cleared.as_mut() {
                    f(cells);
                }
            }
            GameEvent::NextPiece { current, following } => {
                if let Some(f) = self.next_piece.as_mut() {
                    f(*current, *following);
                }
            }
            GameEvent::LoopTick { delay_ms } => {
                if let Some(f) = self.loop_tick.as_mut() {
                    f(*delay_ms);
                }
            }
            GameEvent::ScoreChanged {
                score,
                level,
                multiplier,
            } => {
                if let Some(f) = self.score_changed.as_mut() {
                    f(*score, *level, *multiplier);
                }
            }
            GameEvent::LifeLost { lives } => {
                if let Some(f) = self.life_lost.as_mut() {
                    f(*lives);
                }
            }
            GameEvent::GameOver { score } => {
                if let Some(f) = self.game_over.as_mut() {
                    f(*score);
                }
            }
            GameEvent::HighScore => {
                if let Some(f) = self.high_score.as_mut() {
                    f();
                }
            }
            GameEvent::Placed => {
                if let Some(f) = self.placed.as_mut() {
                    f();
                }
            }
            GameEvent::Rejected => {
                if let Some(f) = self.rejected.as_mut() {
                    f();
                }
            }
        }
    }

    /// Dispatch a batch in order
    pub fn dispatch_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("line_cleared", &self.line_cleared.is_some())
            .field("next_piece", &self.next_piece.is_some())
            .field("loop_tick", &self.loop_tick.is_some())
            .field("game_over", &self.game_over.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_reaches_only_matching_slot() {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let overs = Arc::new(Mutex::new(0));

        let mut listeners = Listeners::new();
        let t = Arc::clone(&ticks);
        listeners.on_loop_tick(move |ms| t.lock().unwrap().push(ms));
        let o = Arc::clone(&overs);
        listeners.on_game_over(move |_| *o.lock().unwrap() += 1);

        listeners.dispatch_all(&[
            GameEvent::LoopTick { delay_ms: 12_000 },
            GameEvent::Placed,
            GameEvent::LoopTick { delay_ms: 11_500 },
        ]);

        assert_eq!(*ticks.lock().unwrap(), vec![12_000, 11_500]);
        assert_eq!(*overs.lock().unwrap(), 0);
    }

    #[test]
    fn test_registering_again_replaces_handler() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();

        let h = Arc::clone(&hits);
        listeners.on_placed(move || h.lock().unwrap().push("first"));
        let h = Arc::clone(&hits);
        listeners.on_placed(move || h.lock().unwrap().push("second"));

        listeners.dispatch(&GameEvent::Placed);
        assert_eq!(*hits.lock().unwrap(), vec!["second"]);
    }
}
