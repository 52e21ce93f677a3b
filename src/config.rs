//! Game rules and timing configuration
//!
//! Loaded from a JSON file when one is given, otherwise defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable rules for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Run ===
    /// Length of a run in seconds
    pub duration_secs: u32,
    /// Fever starts when this many seconds are left
    pub fever_threshold_secs: u32,
    /// Points per tap during fever
    pub fever_points: u64,
    /// Points per tap outside fever
    pub base_points: u64,

    // === Population ===
    /// Bubble time-to-live (ms)
    pub bubble_ttl_ms: u64,
    /// Bubbles created when the population runs empty
    pub initial_bubbles: usize,
    /// Population size above which the trickle stops
    pub max_bubbles: usize,
    /// Chance per simulation tick of appending a bubble
    pub spawn_chance: f64,

    // === Clock ===
    /// Countdown period (ms)
    pub countdown_period_ms: u64,
    /// Simulation period (ms)
    pub sim_period_ms: u64,

    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: GAME_DURATION_SECS,
            fever_threshold_secs: FEVER_THRESHOLD_SECS,
            fever_points: FEVER_POINTS,
            base_points: BASE_POINTS,

            bubble_ttl_ms: BUBBLE_TTL_MS,
            initial_bubbles: INITIAL_BUBBLES,
            max_bubbles: MAX_BUBBLES,
            spawn_chance: SPAWN_CHANCE,

            countdown_period_ms: COUNTDOWN_PERIOD_MS,
            sim_period_ms: SIM_PERIOD_MS,

            seed: None,
        }
    }
}

impl GameConfig {
    pub fn countdown_period(&self) -> Duration {
        Duration::from_millis(self.countdown_period_ms.max(1))
    }

    pub fn sim_period(&self) -> Duration {
        Duration::from_millis(self.sim_period_ms.max(1))
    }

    /// Points awarded for one tap
    pub fn tap_points(&self, fever: bool) -> u64 {
        if fever { self.fever_points } else { self.base_points }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("Invalid config {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Cannot read config {}: {}", path.display(), e),
        }

        log::info!("Using default config");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rules() {
        let config = GameConfig::default();
        assert_eq!(config.duration_secs, 60);
        assert_eq!(config.fever_threshold_secs, 10);
        assert_eq!(config.bubble_ttl_ms, 3000);
        assert_eq!(config.max_bubbles, 15);
        assert_eq!(config.tap_points(false), 1);
        assert_eq!(config.tap_points(true), 2);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "duration_secs": 30, "seed": 7 }"#).unwrap();
        assert_eq!(config.duration_secs, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_bubbles, MAX_BUBBLES);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig {
            spawn_chance: 0.25,
            ..Default::default()
        };
        assert_eq!(GameConfig::from_json(&config.to_json().unwrap()).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = GameConfig::load("/nonexistent/bubble-pop.json");
        assert_eq!(config, GameConfig::default());
    }
}
