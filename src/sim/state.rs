//! Game state and core simulation types
//!
//! Everything the render layer needs to draw a frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Derived phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Clock running, normal scoring
    Playing,
    /// Clock running, last seconds with boosted scoring
    Fever,
    /// Run ended, waiting for restart
    Over,
}

/// Display color, opaque to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// A bubble entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    /// Play-area-local position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Logical radius (multiply by density for pixels)
    pub radius: f32,
    pub color: Rgba,
    /// Game clock time at spawn (ms)
    pub created_at_ms: u64,
}

impl Bubble {
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at_ms)
    }

    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.age_ms(now_ms) >= ttl_ms
    }
}

/// Play area as reported by the render layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    /// Logical width
    pub width: f32,
    /// Logical height
    pub height: f32,
    /// Pixels per logical unit
    pub density: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_density(width, height, 1.0)
    }

    pub fn with_density(width: f32, height: f32, density: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "play area must be non-empty");
        debug_assert!(density > 0.0, "density must be positive");
        Self {
            width,
            height,
            density,
        }
    }

    pub fn width_px(&self) -> f32 {
        self.width * self.density
    }

    pub fn height_px(&self) -> f32 {
        self.height * self.density
    }
}

/// Something that happened during a tick or tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Popped { id: u32, points: u64 },
    Expired { count: usize },
    FeverStarted,
    GameOver { score: u64 },
    Restarted { run: u32 },
}

/// Complete game state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Live bubbles
    pub bubbles: Vec<Bubble>,
    pub score: u64,
    /// Seconds left on the countdown
    pub time_left: u32,
    pub is_game_over: bool,
    pub is_fever_time: bool,
    /// Run counter, bumped on every restart
    pub run: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GAME_DURATION_SECS)
    }
}

impl GameState {
    /// Fresh state for a run of the given length
    pub fn new(duration_secs: u32) -> Self {
        Self {
            bubbles: Vec::new(),
            score: 0,
            time_left: duration_secs,
            is_game_over: false,
            is_fever_time: false,
            run: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_game_over {
            GamePhase::Over
        } else if self.is_fever_time {
            GamePhase::Fever
        } else {
            GamePhase::Playing
        }
    }

    pub fn bubble(&self, id: u32) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }
}
