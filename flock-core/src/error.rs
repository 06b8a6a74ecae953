use std::collections::TryReserveError;

use thiserror::Error;

/// Everything that can go wrong while building a flock.
///
/// Stepping an initialized flock never fails, so nothing here is produced
/// after [`crate::FlockSetup::initialize`] returns.
#[derive(Debug, Error)]
pub enum FlockError {
    #[error("invalid flock configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not allocate the {buffer} buffers for {agents} agents")]
    ResourceExhausted {
        buffer: &'static str,
        agents: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Rejected agent counts and parameter sets.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unsupported agent count {0}, must be one of 1, 4, 16, 64, 256, 1024, 4096, 16384")]
    UnsupportedAgentCount(usize),
    #[error("missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("bounds on the {axis} axis are inverted: min {min} > max {max}")]
    InvertedBounds { axis: char, min: f32, max: f32 },
    #[error("speed range is inverted: min {min} > max {max}")]
    InvertedSpeedRange { min: f32, max: f32 },
    #[error("step size must be at least 1")]
    ZeroStepSize,
    #[error("bounds on the {axis} axis span more than an f32 can hold: {min} to {max}")]
    UnboundedSpan { axis: char, min: f32, max: f32 },
    #[error("{buffer} state has {actual} entries, expected {expected}")]
    StateLength {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}
