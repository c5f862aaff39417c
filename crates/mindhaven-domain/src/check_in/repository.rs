use async_trait::async_trait;

use super::{CheckInRecord, RawCheckIn};
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Append a validated check-in. Check-ins are never updated or deleted.
    async fn append(&self, record: &CheckInRecord) -> Result<(), DomainError>;

    /// All stored documents for a user, oldest first.
    ///
    /// Rows come back unvalidated; run them through [`super::sanitize`].
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<RawCheckIn>, DomainError>;
}
