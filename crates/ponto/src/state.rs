//! Shared application state.
//!
//! Cloned into every request handler. Holds the configuration built at
//! startup and the components that act on it; none of them read the
//! environment themselves.

use std::sync::Arc;

use ponto_core::storage::CheckInRepository;

use crate::{config::Config, photos::PhotoStore, rate_limit::RateLimiter, storage::SqliteRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Check-in storage.
    pub repo: Arc<dyn CheckInRepository>,
    pub photos: PhotoStore,
    /// Limiter for the ingest route.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Creates state with explicit components.
    pub fn build(config: Config, repo: Arc<dyn CheckInRepository>) -> Self {
        let photos = PhotoStore::new(config.upload_dir.clone());
        let rate_limiter = RateLimiter::new(config.rate_limit_policy());

        Self {
            config: Arc::new(config),
            repo,
            photos,
            rate_limiter,
        }
    }

    /// Creates state backed by the SQLite file named in `config`.
    ///
    /// The schema is not created here; see `bootstrap` in `main`.
    pub fn sqlite(config: Config) -> Self {
        let repo = Arc::new(SqliteRepository::new(config.db_path.clone()));
        Self::build(config, repo)
    }
}
