//! Game settings and simulation configuration
//!
//! Loaded from a JSON file when one is given; any missing field falls back to
//! its default, and an unreadable file falls back to `Settings::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed for reproducible runs (None = fresh seed each session)
    pub seed: Option<u64>,

    // === Audio ===
    /// Queue sound cues for shots, explosions and crashes
    pub sfx_enabled: bool,
    /// Background music (handled by the external audio layer)
    pub music_enabled: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Pools ===
    pub obstacle_capacity: usize,
    pub projectile_capacity: usize,
    pub particle_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            sfx_enabled: true,
            music_enabled: true,

            show_fps: false,

            obstacle_capacity: OBSTACLE_CAPACITY,
            projectile_capacity: PROJECTILE_CAPACITY,
            particle_capacity: PARTICLE_CAPACITY,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// The configured seed, or a freshly drawn one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Simulation configuration with the seed resolved
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.resolve_seed(),
            obstacle_capacity: self.obstacle_capacity,
            projectile_capacity: self.projectile_capacity,
            particle_capacity: self.particle_capacity,
        }
    }
}

/// Fixed parameters of one `Simulation`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub seed: u64,
    pub obstacle_capacity: usize,
    pub projectile_capacity: usize,
    pub particle_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            obstacle_capacity: OBSTACLE_CAPACITY,
            projectile_capacity: PROJECTILE_CAPACITY,
            particle_capacity: PARTICLE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "sfx_enabled": false }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(!settings.sfx_enabled);
        assert!(settings.music_enabled);
        assert_eq!(settings.obstacle_capacity, OBSTACLE_CAPACITY);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(7),
            show_fps: true,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ seed: nope").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from("/nonexistent/spinner-chase/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_fixed_seed_is_used() {
        let settings = Settings {
            seed: Some(1234),
            particle_capacity: 50,
            ..Settings::default()
        };
        let config = settings.sim_config();
        assert_eq!(config.seed, 1234);
        assert_eq!(config.particle_capacity, 50);
    }
}
