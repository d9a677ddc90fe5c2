//! HTTP middleware for the request pipeline
//!
//! Order matters: authentication resolves a tier and stores it in request
//! extensions, then rate limiting reads the tier to pick its ceiling, then
//! the handlers run. The panic boundary wraps everything.

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::application::ApplicationError;
use crate::application::auth::ResolveTierUseCase;
use crate::domain::auth::ApiTier;
use crate::infrastructure::rate_limiter::RateLimiterService;
use crate::presentation::models::ApiError;

/// Request logging middleware with timing and request ID
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "Processing request"
    );

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Shared state for the authentication middleware
#[derive(Clone)]
pub struct AuthState {
    pub resolve_tier: Arc<ResolveTierUseCase>,
}

/// Authentication middleware
///
/// Resolves the Authorization header to a tier and attaches it to the
/// request extensions; requests without a valid credential never reach the
/// rate limiter or the handlers.
pub async fn authenticate_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match state.resolve_tier.execute(auth_header).await {
        Ok(tier) => {
            request.extensions_mut().insert(tier);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Authentication failed");
            ApiError::from(e).into_response()
        }
    }
}

/// Shared state for the rate limiting middleware
#[derive(Clone)]
pub struct RateLimiterState {
    pub service: Arc<RateLimiterService>,
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("enabled", &self.service.is_enabled())
            .finish()
    }
}

/// Add IETF standard rate limit headers to a response
fn add_rate_limit_headers(response: &mut Response, limit: u32, remaining: u32, reset_at: u64) {
    let headers = response.headers_mut();

    headers.insert("ratelimit-limit", HeaderValue::from(limit));
    headers.insert("ratelimit-remaining", HeaderValue::from(remaining));
    if let Ok(val) = HeaderValue::from_str(&reset_at.to_string()) {
        headers.insert("ratelimit-reset", val);
    }
}

/// Rate limiting middleware
///
/// Reads the tier resolved by the authentication middleware and consumes
/// one slot of that tier's fixed window.
pub async fn rate_limit_middleware(
    State(state): State<RateLimiterState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.service.is_enabled() {
        return next.run(request).await;
    }

    let Some(tier) = request.extensions().get::<ApiTier>().copied() else {
        // Authentication must run before rate limiting; a missing tier
        // means the router was assembled wrong.
        tracing::error!("Rate limit middleware ran without a resolved tier");
        return ApiError::internal().into_response();
    };

    let result = state.service.check_tier(tier).await;

    if result.allowed {
        let mut response = next.run(request).await;
        add_rate_limit_headers(&mut response, result.limit, result.remaining, result.reset_at);
        response
    } else {
        let retry_after = result.retry_after.unwrap_or(60);

        tracing::warn!(
            tier = %result.tier,
            retry_after = retry_after,
            "Rate limit exceeded"
        );

        let mut response =
            ApiError::from(ApplicationError::RateLimited { retry_after }).into_response();

        add_rate_limit_headers(&mut response, result.limit, 0, result.reset_at);
        if let Ok(val) = HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert("retry-after", val);
        }

        response
    }
}

/// Panic boundary: convert an escaped panic into the generic 500 envelope.
/// The panic payload is logged server-side and never reaches the client.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::internal().into_response()
}
