//! Error types for the simulation core

use thiserror::Error;

/// Errors raised at the boundary of the bounce engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A capture window with zero samples was asked for a ratio
    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),

    /// Non-finite data arrived from the physics layer
    #[error("bad upstream {field}: {value}")]
    UpstreamData { field: &'static str, value: f32 },

    /// The restart could not be handed to the session runtime
    #[error("restart scheduling failed: {0}")]
    Scheduling(String),
}

/// Failures of the impact effect collaborator
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EffectError {
    #[error("splash pool exhausted ({capacity} active)")]
    PoolExhausted { capacity: usize },
}

/// Tuning load/validation failures
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning file read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("tuning JSON invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tuning value out of range: {field} = {value}")]
    OutOfRange { field: &'static str, value: f32 },
}
