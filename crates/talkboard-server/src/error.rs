//! Error types for the Talkboard API layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! Validation and not-found failures are fully handled here at the
//! endpoint boundary; they never reach the ledger or waiter set, and no
//! partial event is recorded for a rejected mutation. A long-poll
//! timeout is not an error and never produces an `ApiError`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use talkboard_hub::HubError;

/// Errors that can occur in the Talkboard API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A request body or query parameter was malformed or missing a
    /// required field.
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested talk was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<HubError> for ApiError {
    fn from(error: HubError) -> Self {
        match error {
            HubError::TalkNotFound { .. } => Self::NotFound(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
