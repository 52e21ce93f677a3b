//! Game controller
//!
//! Owns the `GameState` and is the only thing that mutates it. The clock
//! calls `countdown_tick` once per second and `sim_tick` once per frame; the
//! render layer calls `on_tap` and `restart`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawn::{SpawnPolicy, expire, populate, remove_by_id};
use super::state::{GameEvent, GamePhase, GameState, PlayArea};
use crate::config::GameConfig;

pub struct GameController {
    config: GameConfig,
    state: GameState,
    area: PlayArea,
    rng: Pcg32,
    /// Run seed for reproducibility
    seed: u64,
    /// Next bubble id
    next_id: u32,
    events: Vec<GameEvent>,
}

impl GameController {
    pub fn new(config: GameConfig, area: PlayArea) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("New game (seed {}, {}s)", seed, config.duration_secs);
        Self {
            state: GameState::new(config.duration_secs),
            area,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            next_id: 1,
            events: Vec::new(),
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn is_running(&self) -> bool {
        !self.state.is_game_over
    }

    pub fn play_area(&self) -> PlayArea {
        self.area
    }

    /// Use a new play area for subsequent spawns and physics
    pub fn resize(&mut self, area: PlayArea) {
        self.area = area;
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn spawn_policy(&self) -> SpawnPolicy {
        SpawnPolicy {
            initial: self.config.initial_bubbles,
            max: self.config.max_bubbles,
            chance: self.config.spawn_chance,
        }
    }

    /// One-second countdown step
    ///
    /// Flags are updated before expiry. Reaching zero ends the run and skips
    /// expiry for that step. Does nothing once the run is over.
    pub fn countdown_tick(&mut self, now_ms: u64) {
        if self.state.is_game_over {
            return;
        }

        self.state.time_left = self.state.time_left.saturating_sub(1);

        if self.state.time_left == self.config.fever_threshold_secs && !self.state.is_fever_time {
            self.state.is_fever_time = true;
            log::info!("Fever time! ({}s left)", self.state.time_left);
            self.events.push(GameEvent::FeverStarted);
        }

        if self.state.time_left == 0 {
            self.state.is_game_over = true;
            log::info!("Game over, score {}", self.state.score);
            self.events.push(GameEvent::GameOver {
                score: self.state.score,
            });
            return;
        }

        let (kept, count) = expire(&self.state.bubbles, now_ms, self.config.bubble_ttl_ms);
        if count > 0 {
            log::debug!("Expired {} bubbles", count);
            self.events.push(GameEvent::Expired { count });
        }
        self.state.bubbles = kept;
    }

    /// One simulation frame: refill, trickle spawn and move
    pub fn sim_tick(&mut self, now_ms: u64) {
        if self.state.is_game_over {
            return;
        }

        let policy = self.spawn_policy();
        let next_id = &mut self.next_id;
        self.state.bubbles = populate(
            &self.state.bubbles,
            &policy,
            &self.area,
            &mut self.rng,
            now_ms,
            || {
                let id = *next_id;
                *next_id = next_id.wrapping_add(1);
                id
            },
        );
    }

    /// Pop a bubble; returns the points awarded
    ///
    /// Unknown ids (already expired or popped) and taps after the run ended
    /// are ignored.
    pub fn on_tap(&mut self, id: u32) -> Option<u64> {
        if self.state.is_game_over {
            return None;
        }

        let (kept, removed) = remove_by_id(&self.state.bubbles, id);
        if !removed {
            return None;
        }

        let points = self.config.tap_points(self.state.is_fever_time);
        self.state.score += points;
        self.state.bubbles = kept;
        self.events.push(GameEvent::Popped { id, points });
        Some(points)
    }

    /// Start a new run after game over; returns false if the run is still live
    pub fn restart(&mut self) -> bool {
        if !self.state.is_game_over {
            log::warn!("Restart ignored: run still in progress");
            return false;
        }

        let run = self.state.run.wrapping_add(1);
        self.state = GameState {
            run,
            ..GameState::new(self.config.duration_secs)
        };
        log::info!("Restarted (run {})", run);
        self.events.push(GameEvent::Restarted { run });
        true
    }
}
