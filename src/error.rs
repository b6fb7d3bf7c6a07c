//! Error types for body and world construction.

use thiserror::Error;

/// Errors raised while building shapes, bodies, or a physics world.
///
/// The simulation step itself never fails; degenerate contacts are skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("circle radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),
    #[error("box dimensions must be finite and positive, got {width} x {height}")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("mass must be finite and positive, got {0}")]
    InvalidMass(f32),
    #[error("invalid physics config: {0}")]
    InvalidConfig(&'static str),
}
