use super::error::ValidationError;
use super::types::{PhotoUpload, ValidSubmission};

/// Minimum name length, counted in characters after trimming.
pub const MIN_NAME_CHARS: usize = 2;
/// Maximum name length, matching the `VARCHAR(255)` column.
pub const MAX_NAME_CHARS: usize = 255;
/// Default upper bound for a photo upload (5 MiB).
pub const DEFAULT_MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Trims and checks a participant name.
pub fn validate_name(raw: Option<&str>) -> Result<String, ValidationError> {
    let name = raw.map(str::trim).unwrap_or_default();

    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    let chars = name.chars().count();
    if chars < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort {
            min: MIN_NAME_CHARS,
        });
    }
    if chars > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_CHARS,
        });
    }

    Ok(name.to_string())
}

/// Returns true if the content type names an image (`image/*`).
pub fn is_image_content_type(content_type: &str) -> bool {
    let content_type = content_type.trim();
    content_type.len() > 6
        && content_type
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Checks presence, MIME type and size of the uploaded image.
pub fn validate_photo(
    photo: Option<PhotoUpload>,
    max_bytes: usize,
) -> Result<PhotoUpload, ValidationError> {
    let photo = photo.ok_or(ValidationError::PhotoRequired)?;

    if !is_image_content_type(&photo.content_type) {
        return Err(ValidationError::InvalidFileType(photo.content_type));
    }
    if photo.bytes.is_empty() {
        return Err(ValidationError::EmptyPhoto);
    }
    if photo.bytes.len() > max_bytes {
        return Err(ValidationError::FileTooLarge { limit: max_bytes });
    }

    Ok(photo)
}

/// Validates a whole submission. The name is checked first.
pub fn validate_submission(
    name: Option<&str>,
    photo: Option<PhotoUpload>,
    max_photo_bytes: usize,
) -> Result<ValidSubmission, ValidationError> {
    let name = validate_name(name)?;
    let photo = validate_photo(photo, max_photo_bytes)?;
    Ok(ValidSubmission { name, photo })
}
