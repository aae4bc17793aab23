mod http_mapping;
mod types;

pub use http_mapping::error_code_to_status_code;
pub use types::{CheckInListResponse, CheckInResponse, ErrorBody, ErrorCode};
