use std::io;

use thiserror::Error;

/// Rejected game configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("max deflection {value} must lie in [0, pi/2) radians")]
    DeflectionOutOfRange { value: f32 },

    #[error("ball moves up to {step} px per tick, paddle hits need less than {limit}")]
    BallTooFast { step: f32, limit: f32 },

    #[error("{name} range is empty: min {min} > max {max}")]
    EmptyRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("tick rate must be non-zero")]
    ZeroTickRate,

    #[error("win score must be non-zero")]
    ZeroWinScore,

    #[error("paddles overlap: field width {field_width} too narrow for margin and paddle width")]
    PaddlesOverlap { field_width: f32 },

    #[error("paddle height {paddle_height} does not fit in field height {field_height}")]
    PaddleTooTall {
        paddle_height: f32,
        field_height: f32,
    },
}

/// Failure reported by one of the loop driver's collaborators
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("input source failed")]
    Input(#[source] io::Error),

    #[error("renderer failed")]
    Render(#[source] io::Error),
}
