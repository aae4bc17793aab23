use async_trait::async_trait;

use crate::checkin::{CheckInRecord, NewCheckIn};

use super::Result;

/// Default page size for [`CheckInRepository::list`].
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Append-only store of check-ins.
#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Creates the backing schema if it does not exist yet. Idempotent.
    async fn initialize(&self) -> Result<()>;

    /// Stores a check-in worth one point, stamped with the current local
    /// time, and returns it as read back from storage.
    async fn create(&self, check_in: &NewCheckIn) -> Result<CheckInRecord>;

    /// Returns at most `limit` records, most recent first.
    async fn list(&self, limit: u32) -> Result<Vec<CheckInRecord>>;
}
