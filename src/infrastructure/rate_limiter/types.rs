//! Rate limiter types and core data structures

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::domain::auth::ApiTier;

/// Key used to identify rate limit buckets
///
/// Counters are keyed by tier only - all clients of a tier share one budget.
/// A per-credential variant exists so the keying can be tightened without
/// reworking the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RateLimitKey {
    /// Shared counter for every client of a tier
    Tier(ApiTier),
    /// Per-credential counter (unused by the default pipeline)
    Credential(String),
}

impl RateLimitKey {
    /// Convert to a storage-compatible key string
    pub fn to_storage_key(&self, prefix: &str) -> String {
        match self {
            RateLimitKey::Tier(tier) => format!("{}:tier:{}", prefix, tier),
            RateLimitKey::Credential(credential) => format!("{}:cred:{}", prefix, credential),
        }
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Maximum requests allowed in the current window
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Unix timestamp when the current window elapses
    pub reset_at: u64,
    /// Retry-After duration in seconds (only set when blocked)
    pub retry_after: Option<u64>,
    /// The tier that was applied
    pub tier: ApiTier,
}

impl RateLimitResult {
    /// Create a new allowed result
    pub fn allowed(limit: u32, remaining: u32, reset_at: u64, tier: ApiTier) -> Self {
        Self {
            allowed: true,
            limit,
            remaining,
            reset_at,
            retry_after: None,
            tier,
        }
    }

    /// Create a new blocked result
    pub fn blocked(limit: u32, reset_at: u64, retry_after: u64, tier: ApiTier) -> Self {
        Self {
            allowed: false,
            limit,
            remaining: 0,
            reset_at,
            retry_after: Some(retry_after),
            tier,
        }
    }
}

/// Fixed window counter state for a single key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedWindowState {
    /// Requests counted in the current window
    pub count: u32,
    /// Start time of the current window (Unix timestamp in seconds)
    pub window_start: u64,
}

/// Get current time in seconds since Unix epoch
pub fn current_time_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}
