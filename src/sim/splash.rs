//! Splash effects spawned where the disc hits the water
//!
//! A splash is a two-phase descriptor stepped by the pool: it plays its
//! frames forward (`Rising`), then in reverse (`Falling`), then is removed.
//! Faster impacts play more frames. Nothing here feeds back into physics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::EffectError;
use crate::tuning::Tuning;

/// Receives impact notifications from the bounce engine
pub trait ImpactSink {
    /// Spawn a transient effect at `position` (bottom-center of the disc)
    fn spawn_impact_effect(&mut self, position: Vec2, intensity: f32) -> Result<(), EffectError>;
}

/// Animation phase of a splash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplashPhase {
    Rising,
    Falling,
    Done,
}

/// One splash animation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplashEffect {
    /// Anchor point (bottom-center)
    pub position: Vec2,
    /// Frames in each phase, 1..=max
    pub frame_count: u8,
    pub phase: SplashPhase,
    /// Step within the current phase
    step: u8,
    timer: f32,
}

impl SplashEffect {
    pub fn new(position: Vec2, intensity: f32, speed_per_frame: f32, max_frames: u8) -> Self {
        Self {
            position,
            frame_count: frame_count_for(intensity, speed_per_frame, max_frames),
            phase: SplashPhase::Rising,
            step: 0,
            timer: 0.0,
        }
    }

    /// Sprite frame to display, `None` once finished
    pub fn current_frame(&self) -> Option<u8> {
        match self.phase {
            SplashPhase::Rising => Some(self.step),
            SplashPhase::Falling => Some(self.frame_count - 1 - self.step),
            SplashPhase::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == SplashPhase::Done
    }

    /// Advance the animation clock
    pub fn advance(&mut self, dt: f32, fps: f32) {
        let frame_time = 1.0 / fps;
        self.timer += dt;
        while self.timer >= frame_time && !self.is_done() {
            self.timer -= frame_time;
            self.step += 1;
            if self.step >= self.frame_count {
                self.step = 0;
                self.phase = match self.phase {
                    SplashPhase::Rising => SplashPhase::Falling,
                    SplashPhase::Falling | SplashPhase::Done => SplashPhase::Done,
                };
            }
        }
    }
}

/// Frames per phase: one per `speed_per_frame` of impact speed, clamped to 1..=max
pub fn frame_count_for(intensity: f32, speed_per_frame: f32, max_frames: u8) -> u8 {
    let frames = (intensity / speed_per_frame).floor();
    if frames.is_nan() {
        return 1;
    }
    frames.clamp(1.0, f32::from(max_frames.max(1))) as u8
}

/// Bounded set of live splashes
#[derive(Debug, Clone)]
pub struct SplashPool {
    pub splashes: Vec<SplashEffect>,
    capacity: usize,
    speed_per_frame: f32,
    max_frames: u8,
    fps: f32,
}

impl SplashPool {
    pub fn new(capacity: usize, speed_per_frame: f32, max_frames: u8, fps: f32) -> Self {
        Self {
            splashes: Vec::with_capacity(capacity),
            capacity,
            speed_per_frame,
            max_frames,
            fps,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.max_splashes,
            tuning.splash_speed_per_frame,
            tuning.splash_max_frames,
            tuning.splash_fps,
        )
    }

    /// Step every splash and drop finished ones
    pub fn advance(&mut self, dt: f32) {
        let fps = self.fps;
        for splash in &mut self.splashes {
            splash.advance(dt, fps);
        }
        self.splashes.retain(|s| !s.is_done());
    }

    pub fn len(&self) -> usize {
        self.splashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.splashes.clear();
    }
}

impl ImpactSink for SplashPool {
    fn spawn_impact_effect(&mut self, position: Vec2, intensity: f32) -> Result<(), EffectError> {
        if self.splashes.len() >= self.capacity {
            return Err(EffectError::PoolExhausted {
                capacity: self.capacity,
            });
        }
        self.splashes.push(SplashEffect::new(
            position,
            intensity,
            self.speed_per_frame,
            self.max_frames,
        ));
        Ok(())
    }
}
