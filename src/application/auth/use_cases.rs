//! Authentication use cases

use std::sync::Arc;

use crate::domain::auth::{ApiTier, AuthError, TierResolver};

/// Scheme prefix expected on the Authorization header
const BEARER_PREFIX: &str = "Bearer ";

/// Use case for resolving a request's Authorization header to a tier
pub struct ResolveTierUseCase {
    resolver: Arc<dyn TierResolver>,
}

impl ResolveTierUseCase {
    pub fn new(resolver: Arc<dyn TierResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve the raw Authorization header value to a tier.
    ///
    /// A missing header or one without the `Bearer ` prefix fails before
    /// the key table is consulted.
    pub async fn execute(&self, auth_header: Option<&str>) -> Result<ApiTier, AuthError> {
        let header = auth_header.ok_or(AuthError::MissingCredential)?;

        let credential = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::MissingCredential)?;

        self.resolver.resolve_tier(credential).await
    }
}
