//! Authentication repository traits

use async_trait::async_trait;

use super::entities::ApiTier;
use super::errors::AuthError;

/// Capability trait for resolving a presented credential to a client tier.
///
/// The bundled implementation is a hardcoded key table; a real key store
/// (database, key-management service) can be substituted without touching
/// the request pipeline.
#[async_trait]
pub trait TierResolver: Send + Sync {
    /// Resolve an API key to its tier, or fail with `AuthError::InvalidApiKey`
    async fn resolve_tier(&self, credential: &str) -> Result<ApiTier, AuthError>;
}
