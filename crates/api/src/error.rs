use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_catalog::{CatalogError, UpstreamError};
use marquee_core::error::CoreError;
use marquee_core::normalize::NormalizationError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CatalogError`] and [`CoreError`] and implements [`IntoResponse`]
/// to produce consistent `{"error": kind, "message": text}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A catalog operation failed (upstream, normalization or domain).
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A domain-level error from `marquee_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            AppError::Catalog(CatalogError::Upstream(err)) => classify_upstream_error(err),
            AppError::Catalog(CatalogError::Normalization(err)) => {
                classify_normalization_error(err)
            }
            AppError::Catalog(CatalogError::Core(core)) | AppError::Core(core) => {
                classify_core_error(core)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": kind,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map an upstream failure to a status, error kind and message.
///
/// - Timeout maps to 504.
/// - Non-2xx upstream status maps to 502.
/// - Network failure maps to 503.
/// - Everything else maps to 500 with a sanitized message.
fn classify_upstream_error(err: &UpstreamError) -> (StatusCode, &'static str, String) {
    match err {
        UpstreamError::Timeout => {
            tracing::warn!("Upstream request timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                "Timeout",
                "Upstream request timed out, please retry later".to_string(),
            )
        }
        UpstreamError::BadStatus(code) => {
            tracing::warn!(status = code, "Upstream returned error status");
            (
                StatusCode::BAD_GATEWAY,
                "BadStatus",
                format!("Upstream API request failed with status {code}"),
            )
        }
        UpstreamError::Network(msg) => {
            tracing::warn!(error = %msg, "Upstream network error");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Network",
                format!("Network error: {msg}"),
            )
        }
        UpstreamError::Internal(msg) => {
            tracing::error!(error = %msg, "Upstream client error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

fn classify_normalization_error(err: &NormalizationError) -> (StatusCode, &'static str, String) {
    match err {
        NormalizationError::MalformedPayload(detail) => {
            tracing::warn!(error = %detail, "Upstream payload could not be normalized");
            (
                StatusCode::BAD_GATEWAY,
                "MalformedPayload",
                "Upstream returned a malformed payload".to_string(),
            )
        }
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NotFound",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "ValidationFailed",
            msg.clone(),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
