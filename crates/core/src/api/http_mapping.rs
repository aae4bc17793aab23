//! Pure functions for mapping error codes to HTTP status codes.

use super::ErrorCode;

/// Maps an [`ErrorCode`] to an HTTP status code.
///
/// Every client-side problem with the submission, including an oversized
/// photo, is a plain 400.
///
/// # Examples
///
/// ```
/// use ponto_core::api::{error_code_to_status_code, ErrorCode};
///
/// assert_eq!(error_code_to_status_code(ErrorCode::FileTooLarge), 400);
/// assert_eq!(error_code_to_status_code(ErrorCode::RateLimitExceeded), 429);
/// ```
pub fn error_code_to_status_code(code: ErrorCode) -> u16 {
    match code {
        ErrorCode::NameRequired
        | ErrorCode::NameTooShort
        | ErrorCode::NameTooLong
        | ErrorCode::PhotoRequired
        | ErrorCode::EmptyPhoto
        | ErrorCode::InvalidFileType
        | ErrorCode::FileTooLarge
        | ErrorCode::InvalidFileField
        | ErrorCode::MalformedRequest => 400,
        ErrorCode::NotFound => 404,
        ErrorCode::RateLimitExceeded => 429,
        ErrorCode::InternalServerError => 500,
    }
}
