mod error;
mod traits;

pub use error::{RepositoryError, Result};
pub use traits::{CheckInRepository, DEFAULT_LIST_LIMIT};
