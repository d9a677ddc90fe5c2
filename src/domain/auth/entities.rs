//! Authentication domain entities

use serde::{Deserialize, Serialize};

/// Client tier resolved from an API key
///
/// Determines which rate limit ceiling applies to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiTier {
    /// Free tier - lowest limits
    Free,
    /// Premium tier - highest limits
    Premium,
}

impl ApiTier {
    /// Get the tier name for logging and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiTier::Free => "free",
            ApiTier::Premium => "premium",
        }
    }
}

impl std::fmt::Display for ApiTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
