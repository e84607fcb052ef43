//! Shell preferences for the headless runner
//!
//! Read from an optional JSON file; anything missing or unreadable falls back
//! to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level index; 0 is the test layout
    pub level: u32,
    /// Stop after this many ticks even if the game has not ended
    pub max_ticks: u64,
    /// Let the autopilot press keys
    pub autopilot: bool,
    /// Autopilot shoots once every this many ticks
    pub fire_interval: u32,
    /// Sleep between ticks to match the nominal timer
    pub realtime: bool,
    pub tick_interval_ms: u64,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: 0,
            max_ticks: 6_000,
            autopilot: true,
            fire_interval: 15,
            realtime: false,
            tick_interval_ms: TICK_INTERVAL_MS,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.validated();
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
