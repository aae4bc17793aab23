use thiserror::Error;

use crate::api::ErrorCode;

/// Reasons a check-in submission is rejected before anything is persisted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must have at least {min} characters")]
    NameTooShort { min: usize },
    #[error("Name must have at most {max} characters")]
    NameTooLong { max: usize },
    #[error("Photo is required")]
    PhotoRequired,
    #[error("Photo is empty")]
    EmptyPhoto,
    #[error("Only image files are accepted (got {0})")]
    InvalidFileType(String),
    #[error("File too large. Maximum allowed: {}", human_size(*.limit))]
    FileTooLarge { limit: usize },
    #[error("Invalid file field: {0}")]
    InvalidFileField(String),
}

impl ValidationError {
    /// Machine-readable code reported to the client.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::NameRequired => ErrorCode::NameRequired,
            ValidationError::NameTooShort { .. } => ErrorCode::NameTooShort,
            ValidationError::NameTooLong { .. } => ErrorCode::NameTooLong,
            ValidationError::PhotoRequired => ErrorCode::PhotoRequired,
            ValidationError::EmptyPhoto => ErrorCode::EmptyPhoto,
            ValidationError::InvalidFileType(_) => ErrorCode::InvalidFileType,
            ValidationError::FileTooLarge { .. } => ErrorCode::FileTooLarge,
            ValidationError::InvalidFileField(_) => ErrorCode::InvalidFileField,
        }
    }
}

fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    const KIB: usize = 1024;

    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}
