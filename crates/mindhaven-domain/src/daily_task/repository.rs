use async_trait::async_trait;

use super::DailyTaskSet;
use crate::check_in::DateKey;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait DailyTaskRepository: Send + Sync {
    async fn find(
        &self,
        user_id: &UserId,
        date: DateKey,
    ) -> Result<Option<DailyTaskSet>, DomainError>;

    /// Insert the set unless one already exists for `(user, date)`.
    /// Returns whichever set is stored afterwards.
    async fn create_if_absent(&self, set: &DailyTaskSet) -> Result<DailyTaskSet, DomainError>;

    /// Compare-and-swap on `set.revision()`. On success the stored revision
    /// is bumped and `true` is returned; `false` means another writer got
    /// there first and nothing was written.
    async fn update_if_revision(&self, set: &DailyTaskSet) -> Result<bool, DomainError>;
}
