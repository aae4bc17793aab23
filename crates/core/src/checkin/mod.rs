mod error;
mod types;
mod validation;

pub use error::ValidationError;
pub use types::{CheckInRecord, NewCheckIn, PhotoUpload, ValidSubmission, DEFAULT_POINTS};
pub use validation::{
    is_image_content_type, validate_name, validate_photo, validate_submission,
    DEFAULT_MAX_PHOTO_BYTES, MAX_NAME_CHARS, MIN_NAME_CHARS,
};
