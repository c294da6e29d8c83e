//! Data-driven game balance
//!
//! Every constant the bounce engine consults can be overridden from a JSON
//! file. Missing fields fall back to `consts`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Tunable parameters for one play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bounce engine ===
    /// Size of the scoring window above the water
    pub proximity_threshold: f32,
    /// Rebound magnitude below which the disc dies
    pub min_viable_speed: f32,
    /// Pause before the session restarts
    pub restart_delay_ms: u64,

    // === Physics ===
    pub gravity: f32,
    pub launch_speed: f32,
    pub restitution: f32,
    pub max_speed: f32,
    pub disc_radius: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub surface_y: f32,
    pub world_width: f32,

    // === Splash ===
    pub splash_speed_per_frame: f32,
    pub splash_max_frames: u8,
    pub splash_fps: f32,
    pub max_splashes: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            proximity_threshold: PROXIMITY_THRESHOLD,
            min_viable_speed: MIN_VIABLE_SPEED,
            restart_delay_ms: RESTART_DELAY_MS,

            gravity: GRAVITY,
            launch_speed: DISC_LAUNCH_SPEED,
            restitution: RESTITUTION,
            max_speed: DISC_MAX_SPEED,
            disc_radius: DISC_RADIUS,
            start_x: DISC_START_X,
            start_y: DISC_START_Y,
            surface_y: WATER_SURFACE_Y,
            world_width: WORLD_WIDTH,

            splash_speed_per_frame: SPLASH_SPEED_PER_FRAME,
            splash_max_frames: SPLASH_MAX_FRAMES,
            splash_fps: SPLASH_FPS,
            max_splashes: MAX_SPLASHES,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Restart delay as a wall-clock duration
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }

    /// Reject values that would break the engine's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let non_negative = [
            ("proximity_threshold", self.proximity_threshold),
            ("min_viable_speed", self.min_viable_speed),
            ("gravity", self.gravity),
            ("launch_speed", self.launch_speed),
            ("restitution", self.restitution),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        let positive = [
            ("max_speed", self.max_speed),
            ("disc_radius", self.disc_radius),
            ("world_width", self.world_width),
            ("splash_speed_per_frame", self.splash_speed_per_frame),
            ("splash_fps", self.splash_fps),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        if self.splash_max_frames == 0 {
            return Err(TuningError::OutOfRange {
                field: "splash_max_frames",
                value: 0.0,
            });
        }

        Ok(())
    }
}
