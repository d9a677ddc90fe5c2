//! Rate Limiter Service
//!
//! Coordinates rate limiting for the request pipeline: picks the ceiling
//! for the resolved tier, consults the fixed window counter, and owns the
//! periodic cleanup of expired window state.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::fixed_window::FixedWindowCounter;
use super::storage::{InMemoryRateLimitStorage, RateLimitStorage};
use super::types::{RateLimitKey, RateLimitResult, current_time_secs};
use crate::config::RateLimitConfig;
use crate::domain::auth::ApiTier;

/// Main rate limiter service
pub struct RateLimiterService {
    /// Fixed window counter for tier budgets
    counter: FixedWindowCounter,
    /// Storage backend, shared with the counter
    storage: Arc<dyn RateLimitStorage>,
    /// Configuration
    config: RateLimitConfig,
}

impl RateLimiterService {
    /// Create a new rate limiter service backed by in-memory storage
    pub fn new(config: RateLimitConfig) -> Self {
        info!("Rate limiter using in-memory storage backend");
        Self::with_storage(Arc::new(InMemoryRateLimitStorage::new()), config)
    }

    /// Create with a custom storage backend (for testing or a future
    /// distributed store)
    pub fn with_storage(storage: Arc<dyn RateLimitStorage>, config: RateLimitConfig) -> Self {
        let counter = FixedWindowCounter::new(
            Arc::clone(&storage),
            "ratelimit:api",
            config.window_seconds,
        );

        Self {
            counter,
            storage,
            config,
        }
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Check the rate limit for a request carrying a resolved tier.
    ///
    /// Counters are keyed by tier only, so every client of a tier draws
    /// from the same budget.
    pub async fn check_tier(&self, tier: ApiTier) -> RateLimitResult {
        if !self.config.enabled {
            return RateLimitResult::allowed(u32::MAX, u32::MAX, current_time_secs(), tier);
        }

        let limit = match tier {
            ApiTier::Free => self.config.free.requests_per_window,
            ApiTier::Premium => self.config.premium.requests_per_window,
        };

        self.counter
            .check(&RateLimitKey::Tier(tier), tier, limit)
            .await
    }

    /// Spawn the periodic cleanup of expired window entries.
    /// Respects the cancellation token for graceful shutdown.
    pub fn spawn_cleanup_task(&self, shutdown_token: CancellationToken) {
        if !self.config.enabled || self.config.cleanup_interval_seconds == 0 {
            return;
        }

        let storage = Arc::clone(&self.storage);
        let cleanup_interval = Duration::from_secs(self.config.cleanup_interval_seconds);

        tokio::spawn(async move {
            let mut interval_timer = interval(cleanup_interval);
            // Skip the immediate first tick
            interval_timer.tick().await;

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        storage.cleanup().await;
                    }
                    _ = shutdown_token.cancelled() => {
                        debug!("Rate limit cleanup task shutting down gracefully");
                        return;
                    }
                }
            }
        });
    }
}
