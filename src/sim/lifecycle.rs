//! Death on weak rebounds and delayed session restart
//!
//! The restart runs on wall-clock time, not simulation ticks, so the pause
//! after death is the same at any frame rate. A pending restart can be
//! cancelled when the session is torn down first.

use std::time::{Duration, Instant};

use super::bounce::{Bounce, BounceState};
use crate::error::SimError;
use crate::tuning::Tuning;

/// Handle to a scheduled restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestartTicket(pub u64);

/// Session-lifecycle collaborator that re-enters the initial scene
pub trait RestartScheduler {
    /// Arrange for the session to restart after `delay`
    fn schedule_restart(&mut self, delay: Duration) -> Result<RestartTicket, SimError>;

    /// Drop a pending restart. Returns false if it already fired or is unknown.
    fn cancel(&mut self, ticket: RestartTicket) -> bool;
}

/// Single-slot deadline timer polled by the game loop
#[derive(Debug, Default)]
pub struct WallClockScheduler {
    next_ticket: u64,
    pending: Option<(RestartTicket, Instant)>,
}

impl WallClockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule relative to an explicit `now`
    pub fn schedule_at(&mut self, now: Instant, delay: Duration) -> Result<RestartTicket, SimError> {
        if let Some((ticket, _)) = self.pending {
            return Err(SimError::Scheduling(format!(
                "restart {} already pending",
                ticket.0
            )));
        }
        self.next_ticket += 1;
        let ticket = RestartTicket(self.next_ticket);
        self.pending = Some((ticket, now + delay));
        Ok(ticket)
    }

    /// Fire the pending restart if its deadline has passed. Fires at most once.
    pub fn poll(&mut self, now: Instant) -> Option<RestartTicket> {
        match self.pending {
            Some((ticket, deadline)) if now >= deadline => {
                self.pending = None;
                Some(ticket)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl RestartScheduler for WallClockScheduler {
    fn schedule_restart(&mut self, delay: Duration) -> Result<RestartTicket, SimError> {
        self.schedule_at(Instant::now(), delay)
    }

    fn cancel(&mut self, ticket: RestartTicket) -> bool {
        match self.pending {
            Some((pending, _)) if pending == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

/// Watches rebound strength and ends the actor's life when it gets too weak
#[derive(Debug, Clone)]
pub struct LifecycleGuard {
    pub min_viable_speed: f32,
    pub restart_delay: Duration,
    died: bool,
    ticket: Option<RestartTicket>,
}

impl LifecycleGuard {
    pub fn new(min_viable_speed: f32, restart_delay: Duration) -> Self {
        Self {
            min_viable_speed,
            restart_delay,
            died: false,
            ticket: None,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.min_viable_speed, tuning.restart_delay())
    }

    /// Inspect this frame's bounce, if any.
    ///
    /// Marks the actor dead and schedules the restart the first time a
    /// rebound falls below `min_viable_speed`. The actor stays dead even if
    /// scheduling fails.
    pub fn check(
        &mut self,
        state: &mut BounceState,
        bounce: Option<&Bounce>,
        scheduler: &mut dyn RestartScheduler,
    ) -> Result<Option<RestartTicket>, SimError> {
        if self.died || !state.alive {
            return Ok(None);
        }
        let Some(bounce) = bounce else {
            return Ok(None);
        };
        if bounce.rebound_magnitude() >= self.min_viable_speed {
            return Ok(None);
        }

        state.alive = false;
        self.died = true;
        log::info!(
            "Disc sank: rebound {:.1} below {:.1}, restarting in {:?}",
            bounce.rebound_magnitude(),
            self.min_viable_speed,
            self.restart_delay
        );

        let ticket = scheduler.schedule_restart(self.restart_delay)?;
        self.ticket = Some(ticket);
        Ok(Some(ticket))
    }

    /// Cancel a restart that has not fired yet (scene teardown)
    pub fn cancel_restart(&mut self, scheduler: &mut dyn RestartScheduler) -> bool {
        match self.ticket.take() {
            Some(ticket) => scheduler.cancel(ticket),
            None => false,
        }
    }

    pub fn has_died(&self) -> bool {
        self.died
    }

    pub fn pending_restart(&self) -> Option<RestartTicket> {
        self.ticket
    }
}
