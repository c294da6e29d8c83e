//! Fixed timestep simulation tick
//!
//! Frame order: physics and water contact, splash request, bounce
//! transition (which may re-seed the capture window), capture sampling,
//! lifecycle check.

use super::bounce::{FrameOutcome, FrameSample};
use super::lifecycle::RestartScheduler;
use super::splash::ImpactSink;
use super::state::Session;
use crate::consts::MAX_SUBSTEPS;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Skip button held this frame
    pub pressed: bool,
}

/// Advance the session by one fixed timestep.
///
/// Dead discs are frozen in place until the session restarts. Effect and
/// scheduling failures are logged; they never stop the frame loop.
pub fn tick(
    session: &mut Session,
    input: &TickInput,
    dt: f32,
    effects: &mut dyn ImpactSink,
    scheduler: &mut dyn RestartScheduler,
) -> FrameOutcome {
    if !session.is_alive() {
        return FrameOutcome::default();
    }

    session.time_ticks += 1;

    session.disc.integrate(dt, session.tuning.world_width);
    let contact = session.water.collide(&mut session.disc);

    let sample = FrameSample {
        distance_to_surface: session.water.distance_to(&session.disc),
        input_pressed: input.pressed,
        vertical_velocity: session.disc.vel.y,
        contact,
    };
    let sample = match sample.validate() {
        Ok(sample) => sample,
        Err(e) => {
            log::warn!("Tick {}: frame skipped: {e}", session.time_ticks);
            session.stats.rejected_frames += 1;
            return FrameOutcome::default();
        }
    };

    let (next, outcome) = session.engine.step(session.bounce, &sample);
    session.bounce = next;

    if let Some(impact) = outcome.impact {
        let at = session.disc.bottom_center();
        if let Err(e) = effects.spawn_impact_effect(at, impact.intensity) {
            log::debug!("Splash dropped: {e}");
            session.stats.dropped_effects += 1;
        }
    }

    if let Some(bounce) = &outcome.bounce {
        session.disc.vel.y = bounce.rebound_velocity;
        session.stats.record_bounce(bounce);
    }

    if let Err(e) = session
        .guard
        .check(&mut session.bounce, outcome.bounce.as_ref(), scheduler)
    {
        log::error!("Tick {}: {e}", session.time_ticks);
    }

    outcome
}

/// Accumulates variable frame time into whole fixed steps
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Number of `dt` steps to run for a frame of `frame_dt` seconds.
    ///
    /// Capped at `MAX_SUBSTEPS`; excess time is dropped to avoid a spiral of
    /// death after a stall.
    pub fn steps(&mut self, frame_dt: f32, dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= dt && steps < MAX_SUBSTEPS {
            self.accumulator -= dt;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(dt);
        }
        steps
    }
}
