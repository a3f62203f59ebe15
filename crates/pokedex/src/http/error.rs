//! Mapping of repository outcomes to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use crate::repo::RepoError;

/// An error response: a status code and a `{"message": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Build an error response with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// The status this error responds with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The message carried in the body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Status code for a repository outcome.
pub fn status_for(err: &RepoError) -> StatusCode {
    match err {
        RepoError::InvalidIdentifier { .. }
        | RepoError::InvalidRecord { .. }
        | RepoError::IdentityMismatch { .. } => StatusCode::BAD_REQUEST,
        RepoError::NotFound { .. } | RepoError::EmptyCollection { .. } => StatusCode::NOT_FOUND,
        RepoError::Conflict { .. } => StatusCode::CONFLICT,
        RepoError::AllocationFailure { .. } | RepoError::AtomicFailure { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        RepoError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            error!(error = %err, %status, "Request failed");
        } else {
            warn!(error = %err, %status, "Request rejected");
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}
