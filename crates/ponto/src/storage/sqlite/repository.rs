//! SQLite repository implementation.
//!
//! Implements `CheckInRepository` from `ponto_core::storage`. Every call opens
//! its own connection and releases it before returning.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use ponto_core::checkin::{CheckInRecord, NewCheckIn, DEFAULT_POINTS};
use ponto_core::storage::{CheckInRepository, RepositoryError, Result};

use super::conversions::row_to_check_in;
use super::error::{map_open_error, map_tokio_rusqlite_error};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository backed by a single database file.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    path: PathBuf,
}

impl SqliteRepository {
    /// Creates a repository for the database at `path`.
    ///
    /// Nothing is opened until the first operation; call
    /// [`CheckInRepository::initialize`] before serving traffic.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens a connection, runs `function` on it and closes it again.
    ///
    /// The connection is closed on the error path as well: it is dropped
    /// when `call` fails, which shuts down its background thread.
    async fn with_connection<F, R>(&self, function: F) -> Result<R>
    where
        F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Connection::open(&self.path).await.map_err(map_open_error)?;

        let result = conn.call(function).await.map_err(map_tokio_rusqlite_error);

        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, path = %self.path.display(), "Failed to close SQLite connection");
        }

        result
    }
}

#[async_trait]
impl CheckInRepository for SqliteRepository {
    async fn initialize(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| match e {
            RepositoryError::ConnectionFailed(_) => e,
            other => RepositoryError::QueryFailed(format!("Failed to create schema: {other}")),
        })?;

        tracing::info!(path = %self.path.display(), "Check-in table created/verified");
        Ok(())
    }

    async fn create(&self, check_in: &NewCheckIn) -> Result<CheckInRecord> {
        let name = check_in.name.clone();
        let photo_path = check_in.photo_path.clone();

        let record = self
            .with_connection(move |conn| {
                conn.execute(
                    schema::INSERT_CHECK_IN,
                    rusqlite::params![name, photo_path, DEFAULT_POINTS],
                )
                .map_err(wrap_err)?;

                let id = conn.last_insert_rowid();

                conn.query_row(schema::SELECT_CHECK_IN_BY_ID, [id], row_to_check_in)
                    .map_err(wrap_err)
            })
            .await?;

        tracing::debug!(id = record.id, name = %record.name, "Check-in inserted");
        Ok(record)
    }

    async fn list(&self, limit: u32) -> Result<Vec<CheckInRecord>> {
        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare(schema::SELECT_RECENT_CHECK_INS)
                .map_err(wrap_err)?;
            let rows = stmt.query_map([limit], row_to_check_in).map_err(wrap_err)?;

            let mut records = Vec::new();
            for row_result in rows {
                records.push(row_result.map_err(wrap_err)?);
            }
            Ok(records)
        })
        .await
    }
}
