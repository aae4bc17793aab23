//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::NaiveDateTime;
use ponto_core::checkin::CheckInRecord;
use ponto_core::serde::parse_timestamp;
use rusqlite::Row;

/// Convert a SQLite row to a CheckInRecord.
///
/// Expected columns: id, name, photo_path, points, recorded_at (already
/// formatted as `YYYY-MM-DDTHH:MM:SS`)
pub fn row_to_check_in(row: &Row) -> rusqlite::Result<CheckInRecord> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let photo_path: String = row.get(2)?;
    let points: i64 = row.get(3)?;
    let recorded_at: String = row.get(4)?;

    Ok(CheckInRecord {
        id,
        name,
        photo_path,
        points,
        recorded_at: parse_recorded_at(4, &recorded_at)?,
    })
}

fn parse_recorded_at(column: usize, s: &str) -> rusqlite::Result<NaiveDateTime> {
    parse_timestamp(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
