//! Serde helpers for check-in timestamps.
//!
//! Timestamps are local wall-clock times with second precision and no
//! timezone offset, e.g. `2024-01-15T10:30:00`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Wire and storage format for `recordedAt`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a timestamp in [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}

/// Format a timestamp in [`TIMESTAMP_FORMAT`]. Sub-second precision is dropped.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// `#[serde(with = "ponto_core::serde::timestamp")]`
pub mod timestamp {
    use super::*;

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}
