//! Application-level error types

use thiserror::Error;

use crate::domain::auth::errors::AuthError;
use crate::domain::geometry::errors::GeometryError;

/// Aggregate error type crossing the application boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    Authentication(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] GeometryError),

    #[error("Too Many Requests - Rate limit exceeded")]
    RateLimited {
        /// Seconds until the current window elapses
        retry_after: u64,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}
