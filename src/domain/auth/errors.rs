//! Authentication domain errors

use thiserror::Error;

/// Authentication-specific domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Unauthorized - Invalid or missing API key")]
    MissingCredential,

    #[error("Unauthorized - Invalid API key")]
    InvalidApiKey,
}
