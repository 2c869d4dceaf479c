//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{NamespaceError, StoreError};
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
///
/// The `Display` form carries the full detail and is only logged. Clients
/// receive [`ApiError::client_message`], which never exposes internal causes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request used a method the endpoint does not accept.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Request body could not be read.
    #[error("failed to read request body: {0}")]
    UnreadableBody(#[source] axum::Error),

    /// Request body is not a valid namespace document.
    #[error("malformed namespace JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Namespace failed field validation.
    #[error("{0}")]
    Validation(#[from] NamespaceError),

    /// Store failed to commit the namespace.
    #[error("namespace commit failed: {0}")]
    Commit(#[from] StoreError),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnreadableBody(_)
            | ApiError::MalformedJson(_)
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Commit(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message sent to the client.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::MethodNotAllowed => {
                "only the POST method is allowed on this endpoint".to_string()
            }
            ApiError::UnreadableBody(_) => "failed to read request body".to_string(),
            ApiError::MalformedJson(_) => {
                "invalid JSON or incompatible with the expected namespace model".to_string()
            }
            ApiError::Validation(err) => err.to_string(),
            ApiError::Commit(_) => "failed to commit namespace".to_string(),
        }
    }

    /// Returns the metrics outcome label for this error.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::UnreadableBody(_) => "unreadable_body",
            ApiError::MalformedJson(_) => "malformed_json",
            ApiError::Validation(_) => "invalid",
            ApiError::Commit(_) => "commit_failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.client_message() });
        (self.status(), axum::Json(body)).into_response()
    }
}
