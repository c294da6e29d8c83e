//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (idle player)
//! - Wall-clock time only for the restart timer
//! - No rendering or platform dependencies

pub mod body;
pub mod bounce;
pub mod capture;
pub mod idle;
pub mod lifecycle;
pub mod splash;
pub mod state;
pub mod tick;

pub use body::{DiscBody, WaterSurface};
pub use bounce::{
    Bounce, BounceResponse, BounceState, FrameOutcome, FrameSample, ImpactRequest, MotionPhase,
};
pub use capture::CaptureWindow;
pub use idle::IdlePlayer;
pub use lifecycle::{LifecycleGuard, RestartScheduler, RestartTicket, WallClockScheduler};
pub use splash::{ImpactSink, SplashEffect, SplashPhase, SplashPool};
pub use state::{RunStats, RunSummary, Session};
pub use tick::{FixedStep, TickInput, tick};
