//! Geometry domain errors

use thiserror::Error;

/// Validation errors for square-area input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Missing required parameter: 'side'")]
    MissingSide,

    #[error("Invalid input: 'side' must be a positive number")]
    InvalidSide,
}
