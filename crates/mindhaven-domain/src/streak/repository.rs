use async_trait::async_trait;

use super::StreakProgress;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait StreakProgressRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StreakProgress>, DomainError>;

    /// Upsert. The stored watermark must never decrease, even if a stale
    /// progress value is saved after a newer one.
    async fn save(&self, progress: &StreakProgress) -> Result<(), DomainError>;
}
