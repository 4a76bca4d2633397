//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use marquee_api::error::AppError;
use marquee_catalog::{CatalogError, UpstreamError};
use marquee_core::error::CoreError;
use marquee_core::normalize::NormalizationError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn upstream(err: UpstreamError) -> AppError {
    AppError::Catalog(CatalogError::Upstream(err))
}

// ---------------------------------------------------------------------------
// Upstream failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn timeout_returns_504() {
    let (status, json) = error_to_response(upstream(UpstreamError::Timeout)).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"], "Timeout");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn bad_status_returns_502_with_code() {
    let (status, json) = error_to_response(upstream(UpstreamError::BadStatus(401))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "BadStatus");
    assert!(json["message"].as_str().unwrap().contains("401"));
}

#[tokio::test]
async fn network_error_returns_503() {
    let err = upstream(UpstreamError::Network("connection refused".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "Network");
}

#[tokio::test]
async fn upstream_internal_error_is_sanitized() {
    let err = upstream(UpstreamError::Internal("tls backend exploded".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal");
    assert_eq!(json["message"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Normalization and domain errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_payload_returns_502() {
    let err = AppError::Catalog(CatalogError::Normalization(
        NormalizationError::MalformedPayload("movie is not an object".into()),
    ));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "MalformedPayload");
}

#[tokio::test]
async fn not_found_returns_404() {
    let err = AppError::Core(CoreError::movie_not_found("999"));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "NotFound");
    assert_eq!(json["message"], "Movie with id 999 not found");
}

#[tokio::test]
async fn not_found_inside_catalog_error_returns_404() {
    let err = AppError::Catalog(CatalogError::Core(CoreError::favorite_not_found("278")));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Favorite with id 278 not found");
}

#[tokio::test]
async fn validation_returns_422() {
    let err = AppError::Core(CoreError::Validation("count must be between 1 and 50".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "ValidationFailed");
    assert_eq!(json["message"], "count must be between 1 and 50");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret credentials leaked".into());
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal");
    assert_eq!(json["message"], "An internal error occurred");

    let core = AppError::Core(CoreError::Internal("lock poisoned".into()));
    let (status, json) = error_to_response(core).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json["message"].as_str().unwrap().contains("poisoned"));
}
