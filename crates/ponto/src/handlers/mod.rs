pub mod checkin;
pub mod error;
pub mod fallback;
pub mod health;

pub use error::ApiError;
