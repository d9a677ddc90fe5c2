//! Rate Limiting Infrastructure
//!
//! This module provides the tier-differentiated rate limiting system:
//! - Fixed window counter anchored to wall-clock time
//! - Tiered limits based on the resolved API tier (Premium > Free)
//! - Injectable storage backend (in-memory for single-process deployments;
//!   the trait is the seam for a distributed store)

pub mod fixed_window;
pub mod service;
pub mod storage;
pub mod types;

pub use service::RateLimiterService;
pub use storage::{InMemoryRateLimitStorage, RateLimitStorage};
pub use types::{RateLimitKey, RateLimitResult};
