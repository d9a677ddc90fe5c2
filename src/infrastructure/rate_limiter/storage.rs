//! Rate Limit Storage Backends
//!
//! Storage for fixed window counter state. The bundled backend is
//! in-memory, for single-process deployments; the trait exists so a
//! distributed store can be dropped in later.
//!
//! `increment` is the atomic primitive: it advances the counter for the
//! given window in one step, so concurrent arrivals never undercount.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::types::FixedWindowState;

/// Trait for rate limit storage backends
#[async_trait]
pub trait RateLimitStorage: Send + Sync {
    /// Atomically increment the counter for `key` within the window starting
    /// at `window_start`, resetting the counter first if the stored window is
    /// older. Returns the count after the increment.
    async fn increment(
        &self,
        key: &str,
        window_start: u64,
        ttl_secs: u64,
    ) -> Result<u32, String>;

    /// Get the current window state without modifying it
    async fn get_window(&self, key: &str) -> Result<Option<FixedWindowState>, String>;

    /// Overwrite the window state (used by tests and window seeding)
    async fn set_window(
        &self,
        key: &str,
        state: &FixedWindowState,
        ttl_secs: u64,
    ) -> Result<(), String>;

    /// Delete a key
    async fn delete(&self, key: &str) -> Result<(), String>;

    /// Cleanup expired entries (for in-memory storage)
    async fn cleanup(&self);
}

/// In-memory storage entry with expiration
#[derive(Clone)]
struct MemoryEntry {
    state: FixedWindowState,
    expires_at: u64,
}

/// In-memory storage backend for single-process deployments
pub struct InMemoryRateLimitStorage {
    windows: Arc<RwLock<HashMap<String, MemoryEntry>>>,
}

impl InMemoryRateLimitStorage {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn current_time() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

impl Default for InMemoryRateLimitStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimitStorage for InMemoryRateLimitStorage {
    async fn increment(
        &self,
        key: &str,
        window_start: u64,
        ttl_secs: u64,
    ) -> Result<u32, String> {
        // Read-modify-write under a single write lock: the increment is
        // atomic with respect to concurrent checks of the same key.
        let mut windows = self.windows.write().await;
        let entry = windows.entry(key.to_string()).or_insert_with(|| MemoryEntry {
            state: FixedWindowState {
                count: 0,
                window_start,
            },
            expires_at: 0,
        });

        if entry.state.window_start != window_start {
            // Window elapsed, counter returns to zero
            entry.state = FixedWindowState {
                count: 0,
                window_start,
            };
        }

        entry.state.count += 1;
        entry.expires_at = Self::current_time() + ttl_secs;
        Ok(entry.state.count)
    }

    async fn get_window(&self, key: &str) -> Result<Option<FixedWindowState>, String> {
        let windows = self.windows.read().await;
        if let Some(entry) = windows.get(key)
            && Self::current_time() < entry.expires_at
        {
            return Ok(Some(entry.state.clone()));
        }
        Ok(None)
    }

    async fn set_window(
        &self,
        key: &str,
        state: &FixedWindowState,
        ttl_secs: u64,
    ) -> Result<(), String> {
        let mut windows = self.windows.write().await;
        windows.insert(
            key.to_string(),
            MemoryEntry {
                state: state.clone(),
                expires_at: Self::current_time() + ttl_secs,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let mut windows = self.windows.write().await;
        windows.remove(key);
        Ok(())
    }

    async fn cleanup(&self) {
        let now = Self::current_time();
        let mut windows = self.windows.write().await;
        windows.retain(|_, entry| entry.expires_at > now);
        debug!("Completed rate limit storage cleanup");
    }
}
