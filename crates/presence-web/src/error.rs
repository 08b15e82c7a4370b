use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use presence_core::error::PresenceError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Failure from the data layer.
    #[error(transparent)]
    Presence(#[from] PresenceError),

    /// The user id path segment is not a non-negative integer.
    #[error("User not found: {0}")]
    InvalidUserId(String),

    /// The blocking load task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Presence(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::InvalidUserId(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
