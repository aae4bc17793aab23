//! Check-in handlers.
//!
//! `POST /ponto` reads the whole multipart form and validates it before
//! touching disk or the database, then writes the photo and the row in that
//! order. The two writes are not atomic: if the insert fails the photo stays
//! on disk without a record, and that is logged.

use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        rejection::QueryRejection,
        Multipart, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use ponto_core::api::{CheckInListResponse, CheckInResponse};
use ponto_core::checkin::{validate_submission, NewCheckIn, PhotoUpload, ValidationError};
use ponto_core::storage::DEFAULT_LIST_LIMIT;

use crate::{handlers::ApiError, state::AppState};

/// Multipart field carrying the participant name.
pub const NAME_FIELD: &str = "nome";
/// Multipart field carrying the photo.
pub const PHOTO_FIELD: &str = "foto";

/// Upper bound for `GET /pontos?limit=`.
pub const MAX_LIST_LIMIT: u32 = 500;

/// Raw form contents, before validation.
#[derive(Debug, Default)]
struct CheckInForm {
    name: Option<String>,
    photo: Option<PhotoUpload>,
}

/// Record a check-in (POST /ponto).
pub async fn create_check_in(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CheckInResponse>, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::Malformed(e.body_text()))?;
    let max_photo_bytes = state.config.max_photo_bytes;

    let form = read_form(multipart, max_photo_bytes).await?;
    let submission = validate_submission(form.name.as_deref(), form.photo, max_photo_bytes)?;

    let photo_path = state
        .photos
        .save(&submission.photo)
        .await
        .map_err(ApiError::PhotoWrite)?;

    let record = state
        .repo
        .create(&NewCheckIn::new(submission.name, photo_path.as_str()))
        .await
        .inspect_err(|_| {
            tracing::error!(photo = %photo_path, "Photo stored without a check-in record");
        })?;

    tracing::info!(id = record.id, name = %record.name, photo = %record.photo_path, "Check-in recorded");

    Ok(Json(CheckInResponse::new(record)))
}

/// Query parameters for listing check-ins.
#[derive(Debug, Deserialize)]
pub struct ListCheckInsQuery {
    /// Maximum records to return (default: 50, clamped to 1..=500)
    pub limit: Option<u32>,
}

/// List recent check-ins, newest first (GET /pontos).
pub async fn list_check_ins(
    State(state): State<AppState>,
    query: Result<Query<ListCheckInsQuery>, QueryRejection>,
) -> Result<Json<CheckInListResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Malformed(e.body_text()))?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);

    let records = state.repo.list(limit).await?;

    Ok(Json(CheckInListResponse::new(records)))
}

async fn read_form(mut multipart: Multipart, max_photo_bytes: usize) -> Result<CheckInForm, ApiError> {
    let mut form = CheckInForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_photo_bytes))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            PHOTO_FIELD => {
                if form.photo.is_some() {
                    return Err(ValidationError::InvalidFileField(field_name.clone()).into());
                }
                form.photo = Some(read_photo(field, max_photo_bytes).await?);
            }
            _ if field.file_name().is_some() => {
                return Err(ValidationError::InvalidFileField(field_name.clone()).into());
            }
            NAME_FIELD => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, max_photo_bytes))?;
                form.name = Some(text);
            }
            _ => {
                tracing::debug!(field = %field_name, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

/// Streams the photo in, failing as soon as it passes `max_bytes`.
async fn read_photo(mut field: Field<'_>, max_bytes: usize) -> Result<PhotoUpload, ApiError> {
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if bytes.len() + chunk.len() > max_bytes {
            return Err(ValidationError::FileTooLarge { limit: max_bytes }.into());
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(PhotoUpload::new(content_type, bytes))
}

/// Hitting the request body limit is reported as an oversized photo.
fn multipart_error(err: MultipartError, max_photo_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::FileTooLarge {
            limit: max_photo_bytes,
        }
        .into()
    } else {
        ApiError::Malformed(err.body_text())
    }
}
