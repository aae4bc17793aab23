//! Storage backend implementations.
//!
//! This module provides the concrete implementation of the repository trait
//! defined in `ponto_core::storage`: a single-file SQLite database.

pub mod sqlite;

pub use sqlite::SqliteRepository;
