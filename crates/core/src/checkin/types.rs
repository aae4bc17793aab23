use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Points awarded for a single check-in.
pub const DEFAULT_POINTS: i64 = 1;

/// A persisted check-in.
///
/// Records are append-only: `id` and `recorded_at` are assigned by storage
/// at creation and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub id: i64,
    pub name: String,
    /// Location of the photo relative to the upload directory.
    pub photo_path: String,
    pub points: i64,
    /// Local time, second precision.
    #[serde(with = "crate::serde::timestamp")]
    pub recorded_at: NaiveDateTime,
}

/// A check-in that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckIn {
    pub name: String,
    pub photo_path: String,
}

impl NewCheckIn {
    pub fn new(name: impl Into<String>, photo_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            photo_path: photo_path.into(),
        }
    }
}

/// An uploaded image as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    /// File extension for the stored image, derived from the MIME subtype.
    pub fn extension(&self) -> &'static str {
        let subtype = self
            .content_type
            .split(';')
            .next()
            .and_then(|mime| mime.trim().strip_prefix("image/"))
            .unwrap_or_default()
            .to_ascii_lowercase();

        match subtype.as_str() {
            "jpeg" | "jpg" | "pjpeg" => "jpg",
            "png" => "png",
            "webp" => "webp",
            "gif" => "gif",
            "bmp" => "bmp",
            "heic" => "heic",
            "avif" => "avif",
            _ => "img",
        }
    }
}

/// A fully validated submission: trimmed name plus an image within limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub photo: PhotoUpload,
}
