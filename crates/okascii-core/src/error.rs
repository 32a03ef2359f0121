//! Configuration validation errors.

use thiserror::Error;

/// A backdrop configuration value outside its accepted range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("character ramp must contain at least one character")]
    EmptyRamp,
    #[error("resolution must be in (0, 1], got {0}")]
    Resolution(f32),
    #[error("opacity must be in [0, 1], got {0}")]
    Opacity(f32),
    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f32 },
    #[error("{name} speed range {min}..{max} must be positive and non-empty")]
    SpeedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("{name} must be at least {min}, got {value}")]
    TooSmall {
        name: &'static str,
        min: usize,
        value: usize,
    },
    #[error("left boundary {left} must be below right boundary {right}")]
    Boundary { left: f32, right: f32 },
    #[error("connection range {min}..={max} is invalid")]
    ConnectionRange { min: usize, max: usize },
    #[error("particle table must not be empty")]
    EmptyParticleTable,
    #[error("invalid hex colour {0:?}")]
    Color(String),
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
}
