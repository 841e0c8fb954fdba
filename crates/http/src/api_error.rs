//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into HTTP responses with a JSON body and status code.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use equiptrack_service::ServiceError;

/// Returned to clients for every not-found case, owned by someone else or not.
const NOT_FOUND_MESSAGE: &str = "dataset not found";

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: unusable upload or malformed request.
    BadRequest(String),
    /// 401 Unauthorized: no caller identity on the request.
    Unauthorized,
    /// 404 Not Found.
    NotFound,
    /// 413 Payload Too Large: upload exceeds the configured body limit.
    PayloadTooLarge,
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "missing caller identity".to_owned()),
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_owned()),
            Self::PayloadTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "upload exceeds size limit".to_owned())
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if err.is_not_found() {
            return Self::NotFound;
        }
        match err {
            ServiceError::Ingest(e) => Self::BadRequest(e.to_string()),
            other => Self::Internal(other.into()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::BadRequest(format!("invalid multipart body: {}", err.body_text()))
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        Self::BadRequest(format!("invalid path: {}", err.body_text()))
    }
}
