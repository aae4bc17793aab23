//! JSON payloads exchanged with the kiosk page.
//!
//! Every response carries a `success` flag. Failures add a human-readable
//! `message` and a machine-readable `error` code.

use serde::{Deserialize, Serialize};

use crate::checkin::CheckInRecord;

/// Machine-readable error codes, serialized in SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NameRequired,
    NameTooShort,
    NameTooLong,
    PhotoRequired,
    EmptyPhoto,
    InvalidFileType,
    FileTooLarge,
    InvalidFileField,
    MalformedRequest,
    RateLimitExceeded,
    NotFound,
    InternalServerError,
}

impl ErrorCode {
    /// The code as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NameRequired => "NAME_REQUIRED",
            ErrorCode::NameTooShort => "NAME_TOO_SHORT",
            ErrorCode::NameTooLong => "NAME_TOO_LONG",
            ErrorCode::PhotoRequired => "PHOTO_REQUIRED",
            ErrorCode::EmptyPhoto => "EMPTY_PHOTO",
            ErrorCode::InvalidFileType => "INVALID_FILE_TYPE",
            ErrorCode::FileTooLarge => "FILE_TOO_LARGE",
            ErrorCode::InvalidFileField => "INVALID_FILE_FIELD",
            ErrorCode::MalformedRequest => "MALFORMED_REQUEST",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of every failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub error: ErrorCode,
}

impl ErrorBody {
    pub fn new(error: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}

/// Body of a successful `POST /ponto`: the stored record, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub record: CheckInRecord,
}

impl CheckInResponse {
    pub fn new(record: CheckInRecord) -> Self {
        Self {
            success: true,
            message: "Check-in recorded".to_string(),
            record,
        }
    }
}

/// Body of `GET /pontos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<CheckInRecord>,
}

impl CheckInListResponse {
    pub fn new(data: Vec<CheckInRecord>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> CheckInRecord {
        CheckInRecord {
            id: 1,
            name: "Ana Silva".to_string(),
            photo_path: "fotos/abc.jpg".to_string(),
            points: 1,
            recorded_at: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_error_code_wire_names_match_serde() {
        for code in [
            ErrorCode::FileTooLarge,
            ErrorCode::InvalidFileField,
            ErrorCode::RateLimitExceeded,
            ErrorCode::NotFound,
            ErrorCode::InternalServerError,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::new(ErrorCode::NotFound, "Route not found");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Route not found");
        assert_eq!(json["error"], "NOT_FOUND");
    }

    #[test]
    fn test_check_in_response_flattens_record() {
        let json = serde_json::to_value(CheckInResponse::new(record())).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Ana Silva");
        assert_eq!(json["points"], 1);
        assert_eq!(json["recordedAt"], "2024-01-15T10:30:00");
        assert!(json.get("record").is_none());
    }

    #[test]
    fn test_list_response_counts() {
        let response = CheckInListResponse::new(vec![record(), record()]);
        assert_eq!(response.count, 2);
        assert!(response.success);
    }
}
