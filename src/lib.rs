//! Skipping Stone - bounce-timing engine for a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (capture window, bounce response, lifecycle)
//! - `tuning`: Data-driven game balance
//! - `error`: Error taxonomy shared by the simulation and its collaborators

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{EffectError, SimError, TuningError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Distance above the water within which input is scored
    pub const PROXIMITY_THRESHOLD: f32 = 50.0;
    /// Rebounds slower than this kill the disc
    pub const MIN_VIABLE_SPEED: f32 = 30.0;
    /// Wall-clock pause between death and restart
    pub const RESTART_DELAY_MS: u64 = 750;

    /// World dimensions (the world scrolls 30 screens wide)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const WORLD_WIDTH: f32 = SCREEN_WIDTH * 30.0;

    /// Water strip: 128 units tall, contact plane 40% down from its top
    pub const WATER_HEIGHT: f32 = 128.0;
    pub const WATER_SURFACE_Y: f32 = SCREEN_HEIGHT - WATER_HEIGHT + WATER_HEIGHT * 0.4;

    /// Disc defaults
    pub const DISC_RADIUS: f32 = 16.0;
    pub const DISC_START_X: f32 = 32.0;
    pub const DISC_START_Y: f32 = SCREEN_HEIGHT * 0.7;
    pub const DISC_LAUNCH_SPEED: f32 = 250.0;
    pub const GRAVITY: f32 = 200.0;
    /// Higher is less punitive for the player
    pub const RESTITUTION: f32 = 1.2;
    /// Per-axis speed cap, keeps restitution gains finite
    pub const DISC_MAX_SPEED: f32 = 10_000.0;

    /// Splash sizing: one animation frame per this much impact speed
    pub const SPLASH_SPEED_PER_FRAME: f32 = 25.0;
    pub const SPLASH_MAX_FRAMES: u8 = 6;
    pub const SPLASH_FPS: f32 = 20.0;
    pub const MAX_SPLASHES: usize = 16;
}
