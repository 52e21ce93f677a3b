//! Bubble Pop headless runner
//!
//! Plays one run with an auto-tapper and logs the result. Usage:
//! `bubble-pop [config.json]`

use std::time::Duration;

use rand::Rng;
use tokio::sync::broadcast::error::RecvError;

use bubble_pop::sim::{GameEvent, PlayArea};
use bubble_pop::{GameConfig, GameSession};

/// How often the auto-tapper pops a bubble
const TAP_INTERVAL: Duration = Duration::from_millis(400);

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    log::info!("Bubble Pop (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path),
        None => GameConfig::default(),
    };

    let session = GameSession::spawn(config, PlayArea::new(360.0, 640.0));
    log::info!("Session seed {}", session.seed());
    let mut events = session.subscribe_events();
    let mut ticker = tokio::time::interval(TAP_INTERVAL);
    let mut rng = rand::rng();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let state = session.snapshot();
                if state.bubbles.is_empty() {
                    continue;
                }
                let pick = rng.random_range(0..state.bubbles.len());
                session.tap(state.bubbles[pick].id);
            }
            event = events.recv() => match event {
                Ok(GameEvent::FeverStarted) => log::info!("Fever! Taps score double"),
                Ok(GameEvent::GameOver { score }) => {
                    println!("Game over! Final score: {}", score);
                    break;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => log::warn!("Missed {} game events", missed),
                Err(RecvError::Closed) => break,
            }
        }
    }

    session.shutdown().await;
}
