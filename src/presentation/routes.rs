//! Route definitions and router assembly

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::auth::ResolveTierUseCase;
use crate::config::Config;
use crate::infrastructure::rate_limiter::RateLimiterService;
use crate::presentation::{
    controllers::{AppState, batch_calculate, calculate, health_check, not_found},
    middleware::{
        AuthState, RateLimiterState, authenticate_middleware, handle_panic, logging_middleware,
        rate_limit_middleware,
    },
    models::*,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::calculate,
        crate::presentation::controllers::batch_calculate,
        crate::presentation::controllers::health_check
    ),
    components(
        schemas(
            CalculateRequest,
            CalculateResponse,
            BatchCalculateRequest,
            BatchCalculateResponse,
            BatchItemDto,
            SquareAreaDto,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "calculate", description = "Square area calculation endpoints"),
        (name = "health", description = "System health monitoring endpoints")
    ),
    info(
        title = "Quadra API",
        version = "0.1.0",
        description = "Authenticated, rate-limited square area calculation API"
    )
)]
pub struct ApiDoc;

/// Registers the bearer API key scheme referenced by the path annotations
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_api_key",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Create the application router with the full middleware stack.
///
/// Authentication and rate limiting guard only the `/v1` routes: the health
/// probe, the docs, and the 404 fallback stay outside the pipeline.
pub fn create_router(
    app_state: AppState,
    config: &Config,
    resolve_tier: Arc<ResolveTierUseCase>,
    rate_limiter: Arc<RateLimiterService>,
) -> Router {
    let auth_state = AuthState { resolve_tier };
    let rate_limiter_state = RateLimiterState {
        service: rate_limiter,
    };

    // Layers added last run first: authentication, then rate limiting
    let api_routes = Router::new()
        .route("/calculate", post(calculate))
        .route("/batch-calculate", post(batch_calculate))
        // Method mismatches get the same envelope as unknown routes
        .method_not_allowed_fallback(not_found)
        .layer(middleware::from_fn_with_state(
            rate_limiter_state,
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            auth_state,
            authenticate_middleware,
        ));

    let mut router = Router::new()
        .nest("/v1", api_routes)
        .route("/health", get(health_check))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found);

    // Avoid leaking docs in hardened deployments
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let cors_layer = build_cors_layer(config);

    let service_builder = ServiceBuilder::new()
        // Panic boundary sits outermost so nothing escapes as a connection reset
        .layer(CatchPanicLayer::custom(handle_panic))
        // HTTP tracing
        .layer(TraceLayer::new_for_http())
        // CORS handling
        .layer(cors_layer)
        // Request timeout
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        // Custom logging middleware
        .layer(middleware::from_fn(logging_middleware));

    router.layer(service_builder).with_state(app_state)
}

/// Build the CORS layer from configuration
fn build_cors_layer(config: &Config) -> CorsLayer {
    use tower_http::cors::Any;

    if config.server.allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let mut layer = CorsLayer::new();
        for origin in &config.server.allowed_origins {
            match HeaderValue::from_str(origin) {
                Ok(origin_header) => {
                    layer = layer.allow_origin(origin_header);
                }
                Err(_) => {
                    tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                }
            }
        }
        layer
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
    }
}
