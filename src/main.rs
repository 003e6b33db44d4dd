//! Headless Tetrecs runner (default binary).
//!
//! Plays one game with the autoplayer, logging every game event, then
//! records the result in the score file and prints the final snapshot as a
//! JSON line. Ctrl-C stops the game early; the score is still recorded.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use tetrecs::autoplay;
use tetrecs::config::RunnerConfig;
use tetrecs::core::Listeners;
use tetrecs::engine::{run_listeners, GameLoop};
use tetrecs::scores::ScoreTable;
use tetrecs::types::GameEvent;

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Presentation stand-in: every notification becomes a log line
fn logging_listeners() -> Listeners {
    let mut listeners = Listeners::new();
    listeners.on_next_piece(|current, following| {
        info!(current = %current.kind, rotation = current.rotation, following = %following.kind, "next piece");
    });
    listeners.on_line_cleared(|cells| {
        if !cells.is_empty() {
            info!(blocks = cells.len(), "lines cleared");
        }
    });
    listeners.on_loop_tick(|delay_ms| info!(delay_ms, "turn deadline"));
    listeners.on_score_changed(|score, level, multiplier| {
        info!(score, level, multiplier, "score");
    });
    listeners.on_life_lost(|lives| warn!(lives, "too slow, life lost"));
    listeners.on_game_over(|score| info!(score, "game over"));
    listeners.on_high_score(|| info!("new high score"));
    listeners
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = RunnerConfig::from_env();
    init_tracing(&config.log_filter);
    info!(?config, "tetrecs runner");

    let mut table = ScoreTable::load(&config.scores_path)?;
    if let Some(best) = table.best() {
        info!(best, "high score to beat");
    }

    let (game, rx) = GameLoop::new(config.game);
    let presentation = tokio::spawn(run_listeners(rx, logging_listeners()));

    game.start();
    tokio::select! {
        _ = autoplay::run(&game, Duration::from_millis(config.think_ms)) => {}
        res = tokio::signal::ctrl_c() => {
            res.context("listening for ctrl-c")?;
            info!("interrupted");
            game.stop();
        }
    }

    let mut listeners = presentation.await.context("listener task panicked")?;
    let snapshot = game.snapshot();

    if table.is_high_score(snapshot.score) {
        listeners.dispatch(&GameEvent::HighScore);
    }
    table.insert(config.player.clone(), snapshot.score);
    table.save(&config.scores_path)?;

    println!(
        "{}",
        serde_json::to_string(&snapshot).context("serializing final snapshot")?
    );
    Ok(())
}
