//! Real-time game clock
//!
//! A session runs one tokio task that owns the `GameController` and drives it
//! from two timers (the one-second countdown and the ~60 Hz simulation) plus a
//! command queue for taps, restarts and resizes. Every mutation happens on that
//! task, one whole update at a time, so the state needs no locks.
//!
//! The render layer polls snapshots from a `watch` channel. Game events go out
//! on a bounded `broadcast` channel; hosts that never subscribe cost nothing
//! and slow subscribers lose the oldest events. Dropping the session stops both
//! timers together.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::config::GameConfig;
use crate::sim::{GameController, GameEvent, GameState, PlayArea};

/// Events buffered per subscriber before the oldest are dropped
pub const EVENT_CAPACITY: usize = 64;

/// Input from the render layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Tap(u32),
    Restart,
    Resize(PlayArea),
    Shutdown,
}

/// Handle to a running game
pub struct GameSession {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<GameState>,
    events: broadcast::Sender<GameEvent>,
    seed: u64,
    task: Option<JoinHandle<()>>,
}

impl GameSession {
    /// Start a game on the current tokio runtime
    pub fn spawn(config: GameConfig, area: PlayArea) -> Self {
        let game = GameController::new(config, area);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (snap_tx, snap_rx) = watch::channel(game.state().clone());
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let seed = game.seed();

        let clocks = Clocks::start(game.config());
        let task = tokio::spawn(run(game, clocks, cmd_rx, snap_tx, event_tx.clone()));

        Self {
            commands: cmd_tx,
            snapshots: snap_rx,
            events: event_tx,
            seed,
            task: Some(task),
        }
    }

    /// Latest published state
    pub fn snapshot(&self) -> GameState {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified whenever the state changes
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.snapshots.clone()
    }

    /// Queue a tap; false if the session has stopped
    pub fn tap(&self, id: u32) -> bool {
        self.send(Command::Tap(id))
    }

    pub fn restart(&self) -> bool {
        self.send(Command::Restart)
    }

    pub fn resize(&self, area: PlayArea) -> bool {
        self.send(Command::Resize(area))
    }

    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Receive game events from now on
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// RNG seed of this session, for replaying a run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stop the clock and wait for the game task to finish
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// The two periodic timers of a run plus its time origin
struct Clocks {
    origin: Instant,
    countdown: Interval,
    frames: Interval,
}

impl Clocks {
    fn start(config: &GameConfig) -> Self {
        let origin = Instant::now();
        let mut clocks = Self {
            origin,
            countdown: periodic(origin, config.countdown_period()),
            frames: periodic(origin, config.sim_period()),
        };
        clocks.countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);
        clocks.frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        clocks
    }

    /// Restart both timers as a pair, keeping the time origin
    fn reset(&mut self) {
        self.countdown.reset();
        self.frames.reset();
    }

    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// First tick one period from `start`, not immediately
fn periodic(start: Instant, period: Duration) -> Interval {
    interval_at(start + period, period)
}

async fn run(
    mut game: GameController,
    mut clocks: Clocks,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<GameState>,
    events: broadcast::Sender<GameEvent>,
) {
    loop {
        tokio::select! {
            _ = clocks.countdown.tick(), if game.is_running() => {
                game.countdown_tick(clocks.now_ms());
            }
            _ = clocks.frames.tick(), if game.is_running() => {
                game.sim_tick(clocks.now_ms());
            }
            command = commands.recv() => match command {
                Some(Command::Tap(id)) => {
                    game.on_tap(id);
                }
                Some(Command::Restart) => {
                    if game.restart() {
                        clocks.reset();
                    }
                }
                Some(Command::Resize(area)) => game.resize(area),
                Some(Command::Shutdown) | None => break,
            }
        }

        snapshots.send_if_modified(|current| {
            if current == game.state() {
                false
            } else {
                current.clone_from(game.state());
                true
            }
        });
        for event in game.drain_events() {
            // Err only means nobody is subscribed
            let _ = events.send(event);
        }
    }

    log::info!("Game session stopped");
}
