//! Configuration management
//!
//! Layered configuration: `config/default.toml`, an optional
//! environment-specific file selected by `ENV`, `config/local.toml`, then
//! environment variables with the `QUADRA` prefix and `__` separator
//! (e.g. `QUADRA__SERVER__PORT=8080`).

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether to expose interactive API docs (Swagger UI). Should be false in hardened production.
    pub enable_docs: bool,
    /// Global request timeout in seconds applied at the HTTP layer.
    pub request_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any (development only).
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_docs: true,
            request_timeout_seconds: 30,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Per-tier rate limit ceiling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierLimitConfig {
    /// Requests allowed per window
    pub requests_per_window: u32,
}

impl Default for TierLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 100,
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enabled
    pub enabled: bool,
    /// Window length in seconds
    pub window_seconds: u64,
    /// Cleanup interval for expired window entries in seconds (0 disables)
    pub cleanup_interval_seconds: u64,
    /// Free tier ceiling
    pub free: TierLimitConfig,
    /// Premium tier ceiling
    pub premium: TierLimitConfig,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_seconds: 60,
            cleanup_interval_seconds: 300,
            free: TierLimitConfig {
                requests_per_window: 100,
            },
            premium: TierLimitConfig {
                requests_per_window: 1000,
            },
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Add local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("QUADRA").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// Reject configurations that cannot produce a working server
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.server.host.is_empty() {
            return Err(ValidationError::new("server.host must not be empty"));
        }
        if self.rate_limit.window_seconds == 0 {
            return Err(ValidationError::new(
                "rate_limit.window_seconds must be greater than zero",
            ));
        }
        if self.rate_limit.enabled {
            if self.rate_limit.free.requests_per_window == 0 {
                return Err(ValidationError::new(
                    "rate_limit.free.requests_per_window must be greater than zero",
                ));
            }
            if self.rate_limit.premium.requests_per_window == 0 {
                return Err(ValidationError::new(
                    "rate_limit.premium.requests_per_window must be greater than zero",
                ));
            }
        }
        match self.logging.format.as_str() {
            "json" | "pretty" => {}
            other => {
                return Err(ValidationError::new(format!(
                    "logging.format must be \"json\" or \"pretty\", got \"{other}\""
                )));
            }
        }
        Ok(())
    }
}

/// Error raised when a configuration value fails validation
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
