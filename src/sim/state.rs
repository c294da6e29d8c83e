//! Session state
//!
//! One disc per play session. Restarting re-enters the initial state with
//! the same tuning.

use serde::{Deserialize, Serialize};

use super::body::{DiscBody, WaterSurface};
use super::bounce::{Bounce, BounceResponse, BounceState, MotionPhase};
use super::lifecycle::{LifecycleGuard, RestartScheduler};
use crate::tuning::Tuning;

/// Per-run counters (not gameplay-affecting)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub bounces: u32,
    /// Strongest rebound so far
    pub max_rebound: f32,
    /// Press ratio applied on the most recent bounce
    pub last_ratio: Option<f32>,
    /// Frames skipped because physics reported non-finite data
    pub rejected_frames: u32,
    /// Splashes the effect collaborator refused
    pub dropped_effects: u32,
}

impl RunStats {
    pub fn record_bounce(&mut self, bounce: &Bounce) {
        self.bounces += 1;
        self.max_rebound = self.max_rebound.max(bounce.rebound_magnitude());
        self.last_ratio = Some(bounce.ratio);
    }
}

/// Snapshot of a finished (or abandoned) run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run: u32,
    pub ticks: u64,
    /// Horizontal distance covered from the launch point
    pub distance: f32,
    pub alive: bool,
    #[serde(flatten)]
    pub stats: RunStats,
}

/// A play session: the disc, the water, and the bounce engine state
#[derive(Debug, Clone)]
pub struct Session {
    pub tuning: Tuning,
    pub engine: BounceResponse,
    pub guard: LifecycleGuard,
    pub disc: DiscBody,
    pub water: WaterSurface,
    pub bounce: BounceState,
    pub stats: RunStats,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Completed restarts
    pub restarts: u32,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            engine: BounceResponse::from_tuning(&tuning),
            guard: LifecycleGuard::from_tuning(&tuning),
            disc: DiscBody::launch(&tuning),
            water: WaterSurface::new(tuning.surface_y),
            bounce: BounceState::default(),
            stats: RunStats::default(),
            time_ticks: 0,
            restarts: 0,
            tuning,
        }
    }

    /// Re-enter the initial scene state
    pub fn restart(&mut self) {
        let restarts = self.restarts + 1;
        *self = Self::new(self.tuning.clone());
        self.restarts = restarts;
        log::info!("Session restarted (run {})", self.restarts + 1);
    }

    /// Cancel a restart that has not fired yet. Returns true if one was pending.
    pub fn teardown(&mut self, scheduler: &mut dyn RestartScheduler) -> bool {
        let cancelled = self.guard.cancel_restart(scheduler);
        if cancelled {
            log::info!("Pending restart cancelled");
        }
        cancelled
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.bounce.alive
    }

    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.bounce.phase
    }

    /// Current gap between disc and water
    pub fn distance_to_surface(&self) -> f32 {
        self.water.distance_to(&self.disc)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            run: self.restarts + 1,
            ticks: self.time_ticks,
            distance: self.disc.pos.x - self.tuning.start_x,
            alive: self.bounce.alive,
            stats: self.stats.clone(),
        }
    }
}
