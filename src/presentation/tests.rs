use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;

use crate::config::Config;
use crate::create_app;
use crate::presentation::middleware::handle_panic;

fn test_app() -> Router {
    create_app(Config::default()).router
}

fn app_with_config(mutate: impl FnOnce(&mut Config)) -> Router {
    let mut config = Config::default();
    // Wide window keeps counting tests clear of wall-clock boundaries
    config.rate_limit.window_seconds = 3600;
    mutate(&mut config);
    create_app(config).router
}

fn post_json(uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_authorization_header_returns_401() {
    let response = test_app()
        .oneshot(post_json("/v1/calculate", None, json!({"side": 4})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "error",
            "code": 401,
            "message": "Unauthorized - Invalid or missing API key"
        })
    );
}

#[tokio::test]
async fn non_bearer_scheme_returns_401() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/calculate",
            Some("Basic dGVzdF9rZXk="),
            json!({"side": 4}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_api_key_returns_401() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/calculate",
            Some("Bearer nope"),
            json!({"side": 4}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "error",
            "code": 401,
            "message": "Unauthorized - Invalid API key"
        })
    );
}

#[tokio::test]
async fn calculate_returns_area_with_default_unit() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/calculate",
            Some("Bearer test_key"),
            json!({"side": 4}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "success",
            "data": {"area": 16.0, "side": 4.0, "unit": "unit", "squareUnit": "unit²"}
        })
    );
}

#[tokio::test]
async fn calculate_returns_area_with_explicit_unit() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/calculate",
            Some("Bearer premium_key"),
            json!({"side": 5, "unit": "cm"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "success",
            "data": {"area": 25.0, "side": 5.0, "unit": "cm", "squareUnit": "cm²"}
        })
    );
}

#[tokio::test]
async fn calculate_missing_side_returns_400() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/calculate",
            Some("Bearer test_key"),
            json!({"unit": "cm"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "error",
            "code": 400,
            "message": "Missing required parameter: 'side'"
        })
    );
}

#[tokio::test]
async fn calculate_non_positive_side_returns_400() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/calculate",
            Some("Bearer test_key"),
            json!({"side": -3}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid input: 'side' must be a positive number"
    );
}

#[tokio::test]
async fn malformed_json_body_uses_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Bearer test_key")
        .body(Body::from("{not json"))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn batch_isolates_per_item_failures() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/batch-calculate",
            Some("Bearer test_key"),
            json!({"squares": [{"side": 2}, {"side": -1}, {"side": 3, "unit": "m"}]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(
        data[0],
        json!({"area": 4.0, "side": 2.0, "unit": "unit", "squareUnit": "unit²"})
    );
    assert_eq!(
        data[1],
        json!({
            "error": "Invalid input: 'side' must be a positive number",
            "input": {"side": -1}
        })
    );
    assert_eq!(
        data[2],
        json!({"area": 9.0, "side": 3.0, "unit": "m", "squareUnit": "m²"})
    );
}

#[tokio::test]
async fn batch_empty_array_returns_400() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/batch-calculate",
            Some("Bearer test_key"),
            json!({"squares": []}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Request must include a non-empty 'squares' array"
    );
}

#[tokio::test]
async fn batch_missing_or_non_array_squares_returns_400() {
    for body in [json!({}), json!({"squares": "not-an-array"})] {
        let response = test_app()
            .oneshot(post_json(
                "/v1/batch-calculate",
                Some("Bearer test_key"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Request must include a non-empty 'squares' array"
        );
    }
}

#[tokio::test]
async fn free_tier_is_blocked_after_ceiling() {
    let app = app_with_config(|config| {
        config.rate_limit.free.requests_per_window = 100;
    });

    for i in 0..100 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/v1/calculate",
                Some("Bearer test_key"),
                json!({"side": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::OK,
            "request {} should be admitted",
            i + 1
        );
    }

    let response = app
        .oneshot(post_json(
            "/v1/calculate",
            Some("Bearer test_key"),
            json!({"side": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "error",
            "code": 429,
            "message": "Too Many Requests - Rate limit exceeded"
        })
    );
}

#[tokio::test]
async fn premium_tier_has_higher_ceiling() {
    let app = app_with_config(|config| {
        // Scaled-down ceilings, same 1:10 shape as the published limits
        config.rate_limit.free.requests_per_window = 2;
        config.rate_limit.premium.requests_per_window = 20;
    });

    // Exhaust the free budget
    for _ in 0..2 {
        app.clone()
            .oneshot(post_json(
                "/v1/calculate",
                Some("Bearer test_key"),
                json!({"side": 1}),
            ))
            .await
            .unwrap();
    }
    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/calculate",
            Some("Bearer test_key"),
            json!({"side": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Premium draws from its own, larger budget
    for i in 0..20 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/v1/calculate",
                Some("Bearer premium_key"),
                json!({"side": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::OK,
            "premium request {} should be admitted",
            i + 1
        );
    }
    let response = app
        .oneshot(post_json(
            "/v1/calculate",
            Some("Bearer premium_key"),
            json!({"side": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn admitted_responses_carry_rate_limit_headers() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/calculate",
            Some("Bearer test_key"),
            json!({"side": 2}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("ratelimit-limit")
            .unwrap()
            .to_str()
            .unwrap(),
        "100"
    );
    assert!(response.headers().contains_key("ratelimit-remaining"));
    assert!(response.headers().contains_key("ratelimit-reset"));
}

#[tokio::test]
async fn unmatched_route_returns_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"status": "error", "code": 404, "message": "Route not found"})
    );
}

#[tokio::test]
async fn method_mismatch_returns_404_envelope() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/calculate")
                .header(header::AUTHORIZATION, "Bearer test_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Route not found");
}

#[tokio::test]
async fn health_check_needs_no_credentials() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn docs_disabled_returns_404() {
    let app = app_with_config(|config| config.server.enable_docs = false);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/docs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn panic_in_handler_never_leaks_details() {
    // The real handlers have no panic path, so drive the boundary directly
    let app: Router = Router::new()
        .route(
            "/boom",
            get(|| async {
                panic!("secret internal detail");
                #[allow(unreachable_code)]
                StatusCode::OK
            }),
        )
        .layer(CatchPanicLayer::custom(handle_panic));

    let response = app
        .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "status": "error",
            "code": 500,
            "message": "Server Error - Something went wrong on our end"
        })
    );
}
