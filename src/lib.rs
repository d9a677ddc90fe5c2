//! Quadra - Authenticated, rate-limited square area calculation API
//!
//! # Modules
//!
//! - [`config`] — Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] — Tier model, credential resolution, square-area geometry
//! - [`application`] — Use cases and shared error types
//! - [`infrastructure`] — Static key table and rate limiting backends
//! - [`presentation`] — axum HTTP layer
//! - [`logging`] — Structured logging with tracing
//!
//! # Configuration
//!
//! Environment variables use the `QUADRA__` prefix with double underscore
//! separators:
//!
//! ```bash
//! QUADRA__SERVER__PORT=3000
//! QUADRA__RATE_LIMIT__FREE__REQUESTS_PER_WINDOW=100
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

mod app;

pub use app::{AppHandle, create_app};
pub use config::Config;
pub use logging::init_tracing;
