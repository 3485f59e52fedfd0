//! Game settings and preferences
//!
//! Stored as JSON. Every field has a default, so partial files load fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SPAWN_INTERVAL_MS;

/// Failure to read or parse a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Milliseconds between obstacle spawns
    pub spawn_interval_ms: f64,
    /// Fixed RNG seed (random per run when unset)
    pub seed: Option<u64>,

    // === Display ===
    /// Fraction of the window used for the playfield (width, height)
    pub viewport_scale: (f32, f32),

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Headless demo ===
    /// Simulated seconds the demo binary plays for
    pub demo_seconds: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            seed: None,

            viewport_scale: (0.8, 0.7),

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,

            demo_seconds: 30.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.display());
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Clamp out-of-range values back into something playable
    fn sanitized(mut self) -> Self {
        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms < 0.0 {
            log::warn!(
                "Invalid spawn interval {}, using {}",
                self.spawn_interval_ms,
                SPAWN_INTERVAL_MS
            );
            self.spawn_interval_ms = SPAWN_INTERVAL_MS;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.viewport_scale = (
            self.viewport_scale.0.clamp(0.1, 1.0),
            self.viewport_scale.1.clamp(0.1, 1.0),
        );
        self.demo_seconds = self.demo_seconds.max(0.0);
        self
    }
}
