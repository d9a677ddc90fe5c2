//! Request extractors
//!
//! `ApiJson` wraps `axum::Json` so body rejections render as the standard
//! error envelope instead of axum's plain-text responses.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use super::models::ApiError;

/// JSON body extractor with envelope-shaped rejections
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}
