//! Boundary translator from crate errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bp_core::errors::CoreError;
use bp_db::error::DatabaseError;
use bp_llm::LlmError;
use serde_json::json;
use thiserror::Error;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Every failure a handler can report. Rendered as
/// `{"success": false, "detail": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Duplicate email, duplicate link.
    #[error("{0}")]
    Conflict(String),

    #[error("{INVALID_CREDENTIALS}")]
    Unauthorized,

    /// The LLM API is unconfigured, unreachable, or answered with an error.
    #[error("{0}")]
    DependencyUnavailable(String),

    /// Store failures and anything else unexpected. Carries the raw error text.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::DependencyUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (
            status,
            Json(json!({
                "success": false,
                "detail": self.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => Self::NotFound(msg),
            DatabaseError::Conflict(msg) => Self::Conflict(msg),
            DatabaseError::Validation(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let CoreError::Validation(msg) = err;
        Self::Validation(msg)
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        tracing::warn!(error = %err, "llm call failed");
        Self::DependencyUnavailable(err.to_string())
    }
}
