//! Proximity-gated input capture
//!
//! Input is only scored while the disc is within the proximity window above
//! the water. A window holds:
//! - total: frames observed near the surface since the last bounce
//! - qualifying: frames that count toward the press ratio
//! - pending_release: edge flag, the only field that survives a reset

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Accumulated input statistic for one bounce cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureWindow {
    pub total_samples: u32,
    pub qualifying_samples: u32,
    pub pending_release: bool,
}

impl Default for CaptureWindow {
    /// Scene-start window: one unit of credit, button considered released
    fn default() -> Self {
        Self::seeded(true)
    }
}

impl CaptureWindow {
    /// Fresh window carrying the given edge flag
    pub fn seeded(pending_release: bool) -> Self {
        Self {
            total_samples: 1,
            qualifying_samples: 1,
            pending_release,
        }
    }

    /// Fold one frame of input into the window.
    ///
    /// `distance` must already be floored at zero by the caller.
    #[must_use]
    pub fn sample(self, distance: f32, pressed: bool, threshold: f32) -> Self {
        if distance > threshold {
            // Far from the water: only track the edge
            return Self {
                pending_release: !pressed,
                ..self
            };
        }

        if !self.pending_release {
            // Mid-hold: the frame counts but can't qualify
            return Self {
                total_samples: self.total_samples.saturating_add(1),
                qualifying_samples: self.qualifying_samples,
                pending_release: !pressed,
            };
        }

        Self {
            total_samples: self.total_samples.saturating_add(1),
            qualifying_samples: self.qualifying_samples.saturating_add(u32::from(pressed)),
            pending_release: true,
        }
    }

    /// Re-seed after a bounce, keeping the edge flag
    #[must_use]
    pub fn reset(self) -> Self {
        Self::seeded(self.pending_release)
    }

    /// `qualifying / total`, or an error if the window is empty
    pub fn checked_ratio(&self) -> Result<f32, SimError> {
        if self.total_samples == 0 {
            return Err(SimError::InvariantViolation("capture window has no samples"));
        }
        Ok(self.qualifying_samples as f32 / self.total_samples as f32)
    }

    /// Press ratio in (0, 1].
    ///
    /// An empty window is a programming error: it asserts in debug builds and
    /// falls back to 1.0 (no dampening) in release builds.
    pub fn press_ratio(&self) -> f32 {
        debug_assert!(self.total_samples > 0, "capture window has no samples");
        match self.checked_ratio() {
            Ok(ratio) => ratio,
            Err(e) => {
                log::error!("{e}; using full rebound");
                1.0
            }
        }
    }
}
