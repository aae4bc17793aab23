//! Functional core for the ponto check-in kiosk.
//!
//! Everything in this crate is pure: domain types, validation rules, wire
//! payloads, error-to-status mappings and rate-limit accounting. The `ponto`
//! binary owns all I/O (HTTP, SQLite, filesystem) and calls into here.

pub mod api;
pub mod checkin;
pub mod ratelimit;
pub mod serde;
pub mod storage;
