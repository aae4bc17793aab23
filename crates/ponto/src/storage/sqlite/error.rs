//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`
//! from `ponto_core::storage`.

use ponto_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - Cannot open / not a database → `RepositoryError::ConnectionFailed`
/// - Row conversion failures → `RepositoryError::InvalidData`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::CannotOpen | rusqlite::ErrorCode::NotADatabase
            ) =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..) => RepositoryError::InvalidData(err.to_string()),

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err),
        tokio_rusqlite::Error::ConnectionClosed => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        tokio_rusqlite::Error::Close((_, rusqlite_err)) => {
            RepositoryError::ConnectionFailed(format!("Failed to close connection: {rusqlite_err}"))
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a failure to open a database file.
pub fn map_open_error(err: tokio_rusqlite::Error) -> RepositoryError {
    match map_tokio_rusqlite_error(err) {
        RepositoryError::QueryFailed(msg) => RepositoryError::ConnectionFailed(msg),
        other => other,
    }
}
