//! Application setup and wiring

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::application::auth::ResolveTierUseCase;
use crate::application::geometry::{BatchCalculateUseCase, CalculateAreaUseCase};
use crate::config::Config;
use crate::domain::auth::TierResolver;
use crate::infrastructure::auth::StaticKeyRepository;
use crate::infrastructure::rate_limiter::RateLimiterService;
use crate::presentation::{AppState, create_router};

/// Handle returned from create_app for graceful shutdown coordination
pub struct AppHandle {
    pub router: Router,
    pub shutdown_token: CancellationToken,
}

/// Wire the dependency graph and build the router.
///
/// The tier resolver and the rate limiter storage are both behind traits,
/// so swapping the placeholder key table or the in-memory counters for real
/// backends only touches this function.
pub fn create_app(config: Config) -> AppHandle {
    let config = Arc::new(config);
    let shutdown_token = CancellationToken::new();

    let tier_resolver: Arc<dyn TierResolver> = Arc::new(StaticKeyRepository::new());
    let resolve_tier = Arc::new(ResolveTierUseCase::new(tier_resolver));

    let rate_limiter = Arc::new(RateLimiterService::new(config.rate_limit.clone()));
    rate_limiter.spawn_cleanup_task(shutdown_token.clone());

    let app_state = AppState {
        calculate_use_case: Arc::new(CalculateAreaUseCase::new()),
        batch_use_case: Arc::new(BatchCalculateUseCase::new()),
        config: Arc::clone(&config),
        startup_time: Instant::now(),
    };

    let router = create_router(app_state, &config, resolve_tier, rate_limiter);

    AppHandle {
        router,
        shutdown_token,
    }
}
