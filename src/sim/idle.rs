//! Idle/demo player
//!
//! Releases the button while the disc is far from the water and taps it
//! inside the proximity window, missing a seeded fraction of frames.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Session;
use super::tick::TickInput;

#[derive(Debug, Clone)]
pub struct IdlePlayer {
    rng: Pcg32,
    /// Chance of holding the button on a frame inside the window
    pub accuracy: f64,
}

impl IdlePlayer {
    pub fn new(seed: u64, accuracy: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
        }
    }

    /// Input for the next tick
    pub fn input(&mut self, session: &Session) -> TickInput {
        let near = session.distance_to_surface() <= session.tuning.proximity_threshold;
        TickInput {
            pressed: near && self.rng.random_bool(self.accuracy),
        }
    }
}
