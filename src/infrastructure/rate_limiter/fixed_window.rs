//! Fixed Window Rate Limiter
//!
//! Implements the fixed window counter algorithm: windows are anchored to
//! wall-clock time, each request increments the window's counter, and the
//! counter returns to zero when the window elapses.
//!
//! Increment-then-compare: the counter is advanced atomically in storage
//! before the ceiling check, so concurrent arrivals never undercount.

use std::sync::Arc;
use tracing::{debug, warn};

use super::storage::RateLimitStorage;
use super::types::{RateLimitKey, RateLimitResult, current_time_secs};
use crate::domain::auth::ApiTier;

/// Fixed window counter rate limiter
pub struct FixedWindowCounter {
    storage: Arc<dyn RateLimitStorage>,
    key_prefix: String,
    /// Window size in seconds (60 for per-minute limits)
    window_size: u64,
}

impl FixedWindowCounter {
    /// Create a new fixed window counter
    pub fn new(storage: Arc<dyn RateLimitStorage>, key_prefix: &str, window_size: u64) -> Self {
        Self {
            storage,
            key_prefix: key_prefix.to_string(),
            window_size,
        }
    }

    /// Check if a request is allowed, consuming one slot of the window.
    ///
    /// # Arguments
    /// * `key` - The rate limit key (tier or credential)
    /// * `tier` - The resolved tier, echoed in the result
    /// * `limit` - Maximum requests per window for this tier
    pub async fn check(&self, key: &RateLimitKey, tier: ApiTier, limit: u32) -> RateLimitResult {
        let storage_key = key.to_storage_key(&self.key_prefix);

        let now = current_time_secs();
        let window_start = now - (now % self.window_size);
        let reset_at = window_start + self.window_size;

        // TTL of two windows keeps stale entries reapable without ever
        // expiring a live window.
        let count = match self
            .storage
            .increment(&storage_key, window_start, self.window_size * 2)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                // Fail open: a broken storage backend should not take the
                // API down with it.
                warn!("Failed to increment rate limit counter, allowing request: {}", e);
                return RateLimitResult::allowed(limit, limit, reset_at, tier);
            }
        };

        if count <= limit {
            let remaining = limit - count;
            debug!(
                key = %storage_key,
                tier = %tier,
                remaining = remaining,
                limit = limit,
                "Rate limit check passed"
            );
            RateLimitResult::allowed(limit, remaining, reset_at, tier)
        } else {
            let retry_after = reset_at.saturating_sub(now).max(1);
            debug!(
                key = %storage_key,
                tier = %tier,
                retry_after = retry_after,
                "Rate limit exceeded"
            );
            RateLimitResult::blocked(limit, reset_at, retry_after, tier)
        }
    }
}
