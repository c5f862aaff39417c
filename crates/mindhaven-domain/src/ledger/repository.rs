use async_trait::async_trait;

use super::WellnessLedgerEntry;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<WellnessLedgerEntry>, DomainError>;

    /// Create the ledger with a zero baseline if absent and return the stored entry.
    async fn create_if_absent(
        &self,
        user_id: &UserId,
        display_name: Option<&str>,
    ) -> Result<WellnessLedgerEntry, DomainError>;

    /// Atomically add `delta` to the balance, creating the ledger at zero
    /// first when absent. Returns the new balance.
    async fn increment_points(&self, user_id: &UserId, delta: i64) -> Result<i64, DomainError>;

    async fn set_visibility(
        &self,
        user_id: &UserId,
        visible: bool,
    ) -> Result<WellnessLedgerEntry, DomainError>;

    /// Every ledger in document (creation) order.
    async fn find_all(&self) -> Result<Vec<WellnessLedgerEntry>, DomainError>;
}
