//! Run settings
//!
//! Driver and headless-runner options. Gameplay balance is compiled in
//! (see `consts`); nothing here changes the rules.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SUBSTEPS;

/// Settings for the frame driver and native runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; a fresh seed is derived from the clock when absent
    pub seed: Option<u64>,
    /// Maximum fixed steps per rendered frame
    pub max_substeps: u32,
    /// Let the autopilot steer and pick upgrades
    pub autopilot: bool,

    // === Headless runner ===
    /// Frames per second the headless runner pretends to render at
    pub frame_rate: f32,
    /// Stop the headless run after this many simulated seconds
    pub max_run_secs: f32,
    /// Log a HUD summary every this many simulated seconds (0 disables)
    pub summary_interval_secs: f32,
    /// Print the final snapshot as JSON
    pub print_final_snapshot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_substeps: MAX_SUBSTEPS,
            autopilot: true,

            frame_rate: 60.0,
            max_run_secs: 330.0,
            summary_interval_secs: 15.0,
            print_final_snapshot: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, or defaults if missing/unreadable
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read {} ({}), using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would stall or spin the driver
    pub fn sanitized(mut self) -> Self {
        self.max_substeps = self.max_substeps.clamp(1, 64);
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            self.frame_rate = 60.0;
        }
        if !(self.max_run_secs.is_finite() && self.max_run_secs > 0.0) {
            self.max_run_secs = Self::default().max_run_secs;
        }
        if !self.summary_interval_secs.is_finite() || self.summary_interval_secs < 0.0 {
            self.summary_interval_secs = 0.0;
        }
        self
    }

    /// The configured seed, or one derived from the system clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        })
    }
}
