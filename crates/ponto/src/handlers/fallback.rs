use crate::handlers::ApiError;

/// Catch-all for unknown routes and missing uploads.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
