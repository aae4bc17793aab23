//! On-disk photo storage.
//!
//! Photos land in `<upload_dir>/fotos/<uuid>.<ext>`. The returned path is
//! relative to the upload directory so it can be served from `/uploads/`.

use std::path::{Path, PathBuf};

use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

use ponto_core::checkin::PhotoUpload;

use crate::config::PHOTO_SUBDIR;

/// Writes uploaded photos below the upload directory.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    upload_dir: PathBuf,
}

impl PhotoStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Absolute location of a path previously returned by [`PhotoStore::save`].
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.upload_dir.join(relative)
    }

    /// Writes the photo under a fresh name and returns its relative path.
    ///
    /// Files are created with `create_new`, so an existing photo is never
    /// overwritten.
    pub async fn save(&self, photo: &PhotoUpload) -> std::io::Result<String> {
        let relative = format!("{PHOTO_SUBDIR}/{}.{}", Uuid::new_v4(), photo.extension());
        let path = self.resolve(&relative);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(&photo.bytes).await?;
        file.flush().await?;

        tracing::debug!(path = %path.display(), bytes = photo.bytes.len(), "Photo stored");
        Ok(relative)
    }
}
