//! Bubble Pop - a fixed-duration bubble popping arcade game
//!
//! Core modules:
//! - `sim`: Simulation (bubble factory, wall physics, population, controller)
//! - `session`: Real-time clock driving a controller on a tokio task
//! - `config`: Data-driven game rules

pub mod config;
pub mod session;
pub mod sim;

pub use config::GameConfig;
pub use session::{Command, GameSession};
pub use sim::{GameController, GameState};

/// Game configuration constants
pub mod consts {
    /// Run length (seconds)
    pub const GAME_DURATION_SECS: u32 = 60;
    /// Fever starts with this many seconds left
    pub const FEVER_THRESHOLD_SECS: u32 = 10;
    pub const BASE_POINTS: u64 = 1;
    pub const FEVER_POINTS: u64 = 2;

    /// Countdown period (ms)
    pub const COUNTDOWN_PERIOD_MS: u64 = 1000;
    /// Simulation period (ms), roughly 60 Hz
    pub const SIM_PERIOD_MS: u64 = 16;

    /// Bubble lifetime (ms)
    pub const BUBBLE_TTL_MS: u64 = 3000;
    /// Population after an empty refill
    pub const INITIAL_BUBBLES: usize = 3;
    /// Trickle spawning stops at this population
    pub const MAX_BUBBLES: usize = 15;
    /// Trickle spawn chance per simulation tick
    pub const SPAWN_CHANCE: f64 = 0.05;

    /// Bubble radius range (logical units)
    pub const BUBBLE_MIN_RADIUS: f32 = 30.0;
    pub const BUBBLE_MAX_RADIUS: f32 = 60.0;
    /// Velocity components are drawn from [-BUBBLE_MAX_SPEED, BUBBLE_MAX_SPEED)
    pub const BUBBLE_MAX_SPEED: f32 = 2.0;
    pub const BUBBLE_ALPHA: u8 = 200;
}
