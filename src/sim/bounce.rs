//! Falling/rising state machine
//!
//! Evaluated once per frame on the post-collision vertical velocity
//! (screen space, negative is up). The bounce instant is the first frame of
//! a fall on which the velocity has turned upward: the capture window is
//! consumed, re-seeded, and its press ratio dampens the rebound.

use serde::{Deserialize, Serialize};

use super::capture::CaptureWindow;
use crate::error::SimError;
use crate::tuning::Tuning;

/// Vertical motion phase of the disc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    /// Descending, or ascending before the bounce has been applied
    Falling,
    /// Rebounding after a bounce
    Rising,
}

/// Per-actor state owned by the bounce engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceState {
    pub phase: MotionPhase,
    /// Last vertical velocity seen or written back
    pub vertical_velocity: f32,
    pub alive: bool,
    pub capture: CaptureWindow,
}

impl Default for BounceState {
    fn default() -> Self {
        Self {
            phase: MotionPhase::Falling,
            vertical_velocity: 0.0,
            alive: true,
            capture: CaptureWindow::default(),
        }
    }
}

impl BounceState {
    #[inline]
    pub fn is_falling(&self) -> bool {
        self.phase == MotionPhase::Falling
    }
}

/// What the physics and input layers report for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameSample {
    /// Gap between disc and water, floored at zero
    pub distance_to_surface: f32,
    pub input_pressed: bool,
    /// Post-collision vertical velocity
    pub vertical_velocity: f32,
    /// The disc touched the water this frame
    pub contact: bool,
}

impl FrameSample {
    /// Clamp negative distances, reject non-finite values
    pub fn validate(self) -> Result<Self, SimError> {
        if !self.vertical_velocity.is_finite() {
            return Err(SimError::UpstreamData {
                field: "vertical_velocity",
                value: self.vertical_velocity,
            });
        }
        if !self.distance_to_surface.is_finite() {
            return Err(SimError::UpstreamData {
                field: "distance_to_surface",
                value: self.distance_to_surface,
            });
        }
        Ok(Self {
            distance_to_surface: self.distance_to_surface.max(0.0),
            ..self
        })
    }
}

/// A bounce applied this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub ratio: f32,
    /// Velocity handed over by the collision response
    pub impact_velocity: f32,
    /// Velocity after dampening, to be written back to the body
    pub rebound_velocity: f32,
}

impl Bounce {
    #[inline]
    pub fn rebound_magnitude(&self) -> f32 {
        self.rebound_velocity.abs()
    }
}

/// Request for a splash, sized by impact speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactRequest {
    pub intensity: f32,
}

/// Side effects of one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameOutcome {
    pub bounce: Option<Bounce>,
    pub impact: Option<ImpactRequest>,
}

/// Bounce response rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceResponse {
    pub proximity_threshold: f32,
}

impl Default for BounceResponse {
    fn default() -> Self {
        Self {
            proximity_threshold: crate::consts::PROXIMITY_THRESHOLD,
        }
    }
}

impl BounceResponse {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            proximity_threshold: tuning.proximity_threshold,
        }
    }

    /// Advance the state machine by one frame.
    ///
    /// Order: impact request, phase transition, then capture sampling into
    /// the (possibly re-seeded) window. Dead actors are returned unchanged.
    pub fn step(&self, state: BounceState, frame: &FrameSample) -> (BounceState, FrameOutcome) {
        let mut outcome = FrameOutcome::default();
        if !state.alive {
            return (state, outcome);
        }

        let mut next = state;
        let mut velocity = frame.vertical_velocity;

        // Contacts that leave the disc moving down are grazes
        if frame.contact && velocity <= 0.0 {
            outcome.impact = Some(ImpactRequest {
                intensity: -velocity,
            });
        }

        match state.phase {
            MotionPhase::Falling if velocity < 0.0 => {
                let ratio = state.capture.press_ratio();
                next.capture = state.capture.reset();
                let impact_velocity = velocity;
                velocity *= ratio;
                next.phase = MotionPhase::Rising;
                outcome.bounce = Some(Bounce {
                    ratio,
                    impact_velocity,
                    rebound_velocity: velocity,
                });
                log::debug!(
                    "bounce: ratio {:.3}, velocity {:.1} -> {:.1}",
                    ratio,
                    impact_velocity,
                    velocity
                );
            }
            MotionPhase::Rising if velocity >= 0.0 => {
                next.phase = MotionPhase::Falling;
            }
            _ => {}
        }

        next.vertical_velocity = velocity;
        next.capture = next.capture.sample(
            frame.distance_to_surface,
            frame.input_pressed,
            self.proximity_threshold,
        );

        (next, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn falling_with(total: u32, qualifying: u32) -> BounceState {
        BounceState {
            capture: CaptureWindow {
                total_samples: total,
                qualifying_samples: qualifying,
                pending_release: true,
            },
            ..Default::default()
        }
    }

    fn bounce_frame(velocity: f32) -> FrameSample {
        FrameSample {
            distance_to_surface: 0.0,
            input_pressed: false,
            vertical_velocity: velocity,
            contact: true,
        }
    }

    #[test]
    fn test_full_ratio_keeps_velocity() {
        let engine = BounceResponse::default();
        let (state, outcome) = engine.step(falling_with(10, 10), &bounce_frame(-300.0));

        let bounce = outcome.bounce.expect("bounce should fire");
        assert_eq!(bounce.ratio, 1.0);
        assert_eq!(bounce.rebound_velocity, -300.0);
        assert_eq!(state.vertical_velocity, -300.0);
        assert!(!state.is_falling());
    }

    #[test]
    fn test_partial_ratio_dampens() {
        let engine = BounceResponse::default();
        let (state, outcome) = engine.step(falling_with(10, 2), &bounce_frame(-300.0));

        let bounce = outcome.bounce.expect("bounce should fire");
        assert!((bounce.ratio - 0.2).abs() < 1e-6);
        assert!((state.vertical_velocity - -60.0).abs() < 1e-3);
        assert_eq!(state.phase, MotionPhase::Rising);
    }

    #[test]
    fn test_bounce_samples_into_reset_window() {
        let engine = BounceResponse::default();
        let frame = FrameSample {
            input_pressed: true,
            ..bounce_frame(-300.0)
        };
        let (state, _) = engine.step(falling_with(10, 2), &frame);

        // Re-seeded {1, 1, true}, then one qualifying near frame
        assert_eq!(state.capture.total_samples, 2);
        assert_eq!(state.capture.qualifying_samples, 2);
        assert!(state.capture.pending_release);
    }

    #[test]
    fn test_no_double_bounce() {
        let engine = BounceResponse::default();
        let frame = bounce_frame(-300.0);
        let (state, first) = engine.step(falling_with(10, 5), &frame);
        assert!(first.bounce.is_some());

        let (state, second) = engine.step(state, &frame);
        assert!(second.bounce.is_none());
        assert_eq!(state.vertical_velocity, -300.0);
        assert_eq!(state.phase, MotionPhase::Rising);
    }

    #[test]
    fn test_apex_returns_to_falling_without_touching_window() {
        let engine = BounceResponse::default();
        let rising = BounceState {
            phase: MotionPhase::Rising,
            ..falling_with(7, 3)
        };
        let far = FrameSample {
            distance_to_surface: 200.0,
            input_pressed: false,
            vertical_velocity: 0.0,
            contact: false,
        };

        let (state, outcome) = engine.step(rising, &far);
        assert_eq!(state.phase, MotionPhase::Falling);
        assert!(outcome.bounce.is_none());
        assert_eq!(state.capture.total_samples, 7);
        assert_eq!(state.capture.qualifying_samples, 3);
    }

    #[test]
    fn test_falling_downward_does_nothing() {
        let engine = BounceResponse::default();
        let frame = FrameSample {
            vertical_velocity: 120.0,
            distance_to_surface: 300.0,
            ..Default::default()
        };
        let (state, outcome) = engine.step(BounceState::default(), &frame);
        assert_eq!(state.phase, MotionPhase::Falling);
        assert_eq!(outcome, FrameOutcome::default());
    }

    #[test]
    fn test_impact_uses_pre_rescale_speed() {
        let engine = BounceResponse::default();
        let (_, outcome) = engine.step(falling_with(10, 2), &bounce_frame(-300.0));
        assert_eq!(outcome.impact, Some(ImpactRequest { intensity: 300.0 }));
    }

    #[test]
    fn test_graze_spawns_no_impact() {
        let engine = BounceResponse::default();
        let (_, outcome) = engine.step(BounceState::default(), &bounce_frame(15.0));
        assert!(outcome.impact.is_none());
    }

    #[test]
    fn test_dead_actor_is_frozen() {
        let engine = BounceResponse::default();
        let dead = BounceState {
            alive: false,
            ..falling_with(10, 10)
        };
        let (state, outcome) = engine.step(dead, &bounce_frame(-300.0));
        assert_eq!(state, dead);
        assert_eq!(outcome, FrameOutcome::default());
    }

    #[test]
    fn test_validate_clamps_and_rejects() {
        let frame = FrameSample {
            distance_to_surface: -12.0,
            ..Default::default()
        };
        assert_eq!(frame.validate().unwrap().distance_to_surface, 0.0);

        let nan = FrameSample {
            vertical_velocity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(SimError::UpstreamData {
                field: "vertical_velocity",
                ..
            })
        ));

        let inf = FrameSample {
            distance_to_surface: f32::INFINITY,
            ..Default::default()
        };
        assert!(inf.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_rescale_only_dampens(v in -2000.0f32..-0.001, total in 1u32..500, q in 0u32..500) {
            let engine = BounceResponse::default();
            let state = falling_with(total, q.min(total).max(1));
            let (next, outcome) = engine.step(state, &bounce_frame(v));
            let bounce = outcome.bounce.unwrap();
            prop_assert!(bounce.rebound_velocity.abs() <= v.abs());
            prop_assert!(next.vertical_velocity <= 0.0);
        }
    }
}
