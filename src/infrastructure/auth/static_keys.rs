//! Static API key repository
//!
//! Placeholder credential store: a fixed in-memory key table compared by
//! exact match. Implements [`TierResolver`] so the pipeline is already
//! wired for a real key-issuance service.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::auth::{ApiTier, AuthError, TierResolver};

/// In-memory API key table mapping credentials to tiers
pub struct StaticKeyRepository {
    keys: HashMap<String, ApiTier>,
}

impl StaticKeyRepository {
    /// Create the repository with the built-in placeholder keys
    pub fn new() -> Self {
        let mut keys = HashMap::new();
        keys.insert("test_key".to_string(), ApiTier::Free);
        keys.insert("premium_key".to_string(), ApiTier::Premium);
        Self { keys }
    }

    /// Create a repository over an explicit key table (for tests)
    pub fn with_keys(keys: HashMap<String, ApiTier>) -> Self {
        Self { keys }
    }
}

impl Default for StaticKeyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TierResolver for StaticKeyRepository {
    async fn resolve_tier(&self, credential: &str) -> Result<ApiTier, AuthError> {
        self.keys
            .get(credential)
            .copied()
            .ok_or(AuthError::InvalidApiKey)
    }
}
