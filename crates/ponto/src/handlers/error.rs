use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use ponto_core::api::{error_code_to_status_code, ErrorBody, ErrorCode};
use ponto_core::checkin::ValidationError;
use ponto_core::storage::RepositoryError;

/// Errors returned by request handlers.
///
/// Every variant renders as `{success: false, message, error}`. Server-side
/// failures are logged with their detail and reported with a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("Failed to store photo: {0}")]
    PhotoWrite(#[source] std::io::Error),

    #[error("Route not found")]
    NotFound,

    #[error("Too many attempts, try again later")]
    RateLimited,
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Validation(e) => e.code(),
            ApiError::Malformed(_) => ErrorCode::MalformedRequest,
            ApiError::Storage(_) | ApiError::PhotoWrite(_) => ErrorCode::InternalServerError,
            ApiError::NotFound => ErrorCode::NotFound,
            ApiError::RateLimited => ErrorCode::RateLimitExceeded,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = StatusCode::from_u16(error_code_to_status_code(code))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            tracing::error!(error = %self, code = %code, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::warn!(error = %self, code = %code, "Request rejected");
            self.to_string()
        };

        (status, Json(ErrorBody::new(code, message))).into_response()
    }
}
