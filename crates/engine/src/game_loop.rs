//! Timed game loop
//!
//! Wraps a [`GameState`] with the turn deadline. Player actions and deadline
//! expiry both go through one mutex, so a placement and a timeout can never
//! be processed against the same piece pair at the same time.
//!
//! Events leave through an unbounded channel while the lock is held, which
//! keeps their order exact without ever waiting on the receiver.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::{Events, GameConfig, GameSnapshot, GameState, Listeners, Phase};
use crate::deadline::DeadlineTimer;
use crate::types::{GameEvent, PlacementOutcome};

/// Sending half of the event channel
pub type EventSender = mpsc::UnboundedSender<GameEvent>;

/// Receiving half of the event channel, handed to the presentation side
pub type EventReceiver = mpsc::UnboundedReceiver<GameEvent>;

struct Shared {
    state: GameState,
    timer: DeadlineTimer,
    /// Dropped when the game finishes so receivers see the channel close
    tx: Option<EventSender>,
}

impl Shared {
    /// Forward a transition's events and keep the deadline in step with them
    fn publish(&mut self, events: Events, this: &Weak<Mutex<Shared>>) {
        for event in events {
            match &event {
                GameEvent::LoopTick { delay_ms } => {
                    let weak = this.clone();
                    self.timer
                        .schedule(Duration::from_millis(*delay_ms as u64), move |generation| {
                            on_deadline(weak, generation)
                        });
                }
                GameEvent::GameOver { .. } => {
                    self.timer.shutdown();
                }
                _ => {}
            }
            self.emit(event);
        }

        if self.state.phase().is_finished() {
            self.close();
        }
    }

    fn emit(&self, event: GameEvent) {
        if let Some(tx) = &self.tx {
            debug!(event = event.name(), "emit");
            // A missing presentation layer is not the game's problem
            let _ = tx.send(event);
        }
    }

    fn close(&mut self) {
        self.timer.shutdown();
        self.tx = None;
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Expiry callback: runs on the runtime, serialized with player actions
fn on_deadline(weak: Weak<Mutex<Shared>>, generation: u64) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let mut guard = lock(&shared);
    if !guard.timer.take_expired(generation) {
        return;
    }
    debug!(generation, "deadline expired");
    let events = guard.state.deadline_expired();
    guard.publish(events, &Arc::downgrade(&shared));
}

/// One whole turn: optional swap, clockwise quarter turns, then the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPlan {
    pub swap: bool,
    pub rotations: u32,
    pub x: i32,
    pub y: i32,
}

/// Handle to a running game. Cheap to clone; all clones drive the same game.
#[derive(Clone)]
pub struct GameLoop {
    shared: Arc<Mutex<Shared>>,
}

impl GameLoop {
    /// Create a game with a seeded spawner.
    ///
    /// Must be called from within a tokio runtime; deadlines are spawned on it.
    pub fn new(config: GameConfig) -> (Self, EventReceiver) {
        Self::with_state(GameState::new(config))
    }

    /// Wrap an existing (idle) game state
    pub fn with_state(state: GameState) -> (Self, EventReceiver) {
        Self::with_state_on(state, Handle::current())
    }

    /// Wrap an existing game state, spawning deadlines onto `rt`
    pub fn with_state_on(state: GameState, rt: Handle) -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Shared {
            state,
            timer: DeadlineTimer::new(rt),
            tx: Some(tx),
        };
        (
            Self {
                shared: Arc::new(Mutex::new(shared)),
            },
            rx,
        )
    }

    fn weak(&self) -> Weak<Mutex<Shared>> {
        Arc::downgrade(&self.shared)
    }

    /// Spawn the opening pieces and arm the first deadline
    pub fn start(&self) {
        let mut guard = lock(&self.shared);
        let events = guard.state.start();
        guard.publish(events, &self.weak());
    }

    /// Try to place the current piece centred on (x, y).
    ///
    /// On success the deadline is cancelled and re-armed at the current
    /// level's duration. A rejection leaves the running deadline alone.
    pub fn block_clicked(&self, x: i32, y: i32) -> PlacementOutcome {
        let mut guard = lock(&self.shared);
        let (outcome, events) = guard.state.block_clicked(x, y);
        guard.publish(events, &self.weak());
        outcome
    }

    /// Decide and play a turn under a single lock.
    ///
    /// `decide` sees the pieces the plan will be applied to; no deadline can
    /// swap them out in between. Returns None when `decide` passes or the
    /// game is not running.
    pub fn play_turn<F>(&self, decide: F) -> Option<(TurnPlan, PlacementOutcome)>
    where
        F: FnOnce(&GameState) -> Option<TurnPlan>,
    {
        let mut guard = lock(&self.shared);
        if guard.state.phase() != Phase::Running {
            return None;
        }
        let plan = decide(&guard.state)?;
        if plan.swap {
            guard.state.swap();
        }
        if plan.rotations > 0 {
            guard.state.rotate_current(plan.rotations);
        }
        let (outcome, events) = guard.state.block_clicked(plan.x, plan.y);
        guard.publish(events, &self.weak());
        Some((plan, outcome))
    }

    /// Rotate the current piece clockwise; 3 turns rotates left
    pub fn rotate_current(&self, quarter_turns: u32) -> bool {
        lock(&self.shared).state.rotate_current(quarter_turns)
    }

    /// Exchange current and following pieces
    pub fn swap(&self) -> bool {
        lock(&self.shared).state.swap()
    }

    /// Tear the game down. Once this returns no deadline callback will act.
    pub fn stop(&self) {
        let mut guard = lock(&self.shared);
        if guard.state.phase() != Phase::Stopped && guard.state.phase() != Phase::GameOver {
            info!("stopping game loop");
        }
        guard.state.stop();
        guard.close();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        lock(&self.shared).state.snapshot()
    }

    pub fn phase(&self) -> Phase {
        lock(&self.shared).state.phase()
    }

    pub fn is_finished(&self) -> bool {
        self.phase().is_finished()
    }

    /// Whether a deadline is currently armed
    pub fn deadline_pending(&self) -> bool {
        lock(&self.shared).timer.is_pending()
    }

    /// Read the game state under the lock
    pub fn inspect<R>(&self, f: impl FnOnce(&GameState) -> R) -> R {
        f(&lock(&self.shared).state)
    }
}

impl std::fmt::Debug for GameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = lock(&self.shared);
        f.debug_struct("GameLoop")
            .field("phase", &guard.state.phase())
            .field("score", &guard.state.score())
            .field("lives", &guard.state.lives())
            .field("deadline_pending", &guard.timer.is_pending())
            .finish()
    }
}

/// Feed events to `listeners` until the game closes its channel, then hand
/// the listeners back.
pub async fn run_listeners(mut rx: EventReceiver, mut listeners: Listeners) -> Listeners {
    while let Some(event) = rx.recv().await {
        listeners.dispatch(&event);
    }
    listeners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceSpawner;
    use crate::types::PieceKind;

    fn dot_game() -> GameState {
        GameState::with_spawner(GameConfig::default(), PieceSpawner::scripted(vec![PieceKind::Dot.id()]))
    }

    #[tokio::test(start_paused = true)]
    async fn start_arms_the_deadline() {
        let (game, mut rx) = GameLoop::with_state(dot_game());
        assert!(!game.deadline_pending());
        game.start();
        assert!(game.deadline_pending());

        assert!(matches!(rx.recv().await, Some(GameEvent::NextPiece { .. })));
        assert_eq!(rx.recv().await, Some(GameEvent::LoopTick { delay_ms: 12_000 }));
    }

    #[tokio::test(start_paused = true)]
    async fn play_turn_swaps_rotates_and_places() {
        let state = GameState::with_spawner(
            GameConfig::default(),
            PieceSpawner::scripted(vec![PieceKind::Dot.id(), PieceKind::Line.id()]),
        );
        let (game, _rx) = GameLoop::with_state(state);
        assert_eq!(game.play_turn(|_| None), None);

        game.start();
        let plan = TurnPlan {
            swap: true,
            rotations: 1,
            x: 2,
            y: 0,
        };
        let (played, outcome) = game
            .play_turn(|s| {
                assert_eq!(s.following().map(|p| p.kind()), Some(PieceKind::Line));
                Some(plan)
            })
            .unwrap();
        assert_eq!(played, plan);
        assert!(outcome.is_placed());
        game.inspect(|s| {
            for x in 1..4 {
                assert_eq!(s.grid().get(x, 0), Some(PieceKind::Line.value()));
            }
        });

        // Passing leaves the game and its deadline alone
        assert_eq!(game.play_turn(|_| None), None);
        assert_eq!(game.inspect(|s| s.placements()), 1);
        assert!(game.deadline_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_closes_channel_and_disarms() {
        let (game, mut rx) = GameLoop::with_state(dot_game());
        game.start();
        game.stop();
        assert!(!game.deadline_pending());

        // Drain the start events, then the channel is closed
        while rx.recv().await.is_some() {}

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(game.inspect(|s| s.lives()), 3);
        assert_eq!(game.phase(), Phase::Stopped);
    }
}
