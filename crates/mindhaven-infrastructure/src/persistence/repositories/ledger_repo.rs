use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use mindhaven_domain::ledger::{LedgerRepository, WellnessLedgerEntry};
use mindhaven_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct LedgerRow {
    user_id: String,
    display_name: Option<String>,
    points: i64,
    visible_on_leaderboard: i64,
}

impl LedgerRow {
    fn into_entry(self) -> WellnessLedgerEntry {
        WellnessLedgerEntry::restore(
            UserId::from_string(&self.user_id),
            self.display_name,
            self.points,
            self.visible_on_leaderboard != 0,
        )
    }
}

const SELECT_LEDGER: &str = r#"
    SELECT user_id, display_name, points, visible_on_leaderboard
    FROM wellness_ledgers
"#;

pub struct SqliteLedgerRepository {
    base: SqliteRepositoryBase,
}

impl SqliteLedgerRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    async fn fetch_existing(
        &self,
        user_id: &UserId,
        context: &str,
    ) -> Result<WellnessLedgerEntry, DomainError> {
        let query = format!("{} WHERE user_id = ?1", SELECT_LEDGER);
        let row: LedgerRow = self
            .base
            .fetch_one(sqlx::query_as(&query).bind(user_id.as_str()), context)
            .await?;
        Ok(row.into_entry())
    }
}

#[async_trait]
impl LedgerRepository for SqliteLedgerRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<WellnessLedgerEntry>, DomainError> {
        let query = format!("{} WHERE user_id = ?1", SELECT_LEDGER);

        let row: Option<LedgerRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(user_id.as_str()),
                "Find ledger by user",
            )
            .await?;

        Ok(row.map(LedgerRow::into_entry))
    }

    async fn create_if_absent(
        &self,
        user_id: &UserId,
        display_name: Option<&str>,
    ) -> Result<WellnessLedgerEntry, DomainError> {
        // A supplied display name refreshes the stored one; points are untouched.
        // Without a name this is a plain read and leaves `updated_at` alone.
        let query = r#"
            INSERT INTO wellness_ledgers (user_id, display_name, points)
            VALUES (?1, ?2, 0)
            ON CONFLICT(user_id) DO UPDATE SET
                display_name = COALESCE(excluded.display_name, wellness_ledgers.display_name),
                updated_at = CASE
                    WHEN excluded.display_name IS NULL THEN wellness_ledgers.updated_at
                    ELSE strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                END
        "#;

        self.base
            .execute(
                sqlx::query(query).bind(user_id.as_str()).bind(display_name),
                "Create ledger",
            )
            .await?;

        self.fetch_existing(user_id, "Load created ledger").await
    }

    async fn increment_points(&self, user_id: &UserId, delta: i64) -> Result<i64, DomainError> {
        // Create-at-zero and increment are one statement, so concurrent
        // writers can never lose an update.
        let query = r#"
            INSERT INTO wellness_ledgers (user_id, points)
            VALUES (?1, ?2)
            ON CONFLICT(user_id) DO UPDATE SET
                points = wellness_ledgers.points + excluded.points,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            RETURNING points
        "#;

        let (points,): (i64,) = self
            .base
            .fetch_one(
                sqlx::query_as(query).bind(user_id.as_str()).bind(delta),
                "Increment ledger points",
            )
            .await?;

        tracing::debug!(
            user_id = %user_id,
            delta,
            points,
            "[ledger] points incremented"
        );

        Ok(points)
    }

    async fn set_visibility(
        &self,
        user_id: &UserId,
        visible: bool,
    ) -> Result<WellnessLedgerEntry, DomainError> {
        let query = r#"
            INSERT INTO wellness_ledgers (user_id, points, visible_on_leaderboard)
            VALUES (?1, 0, ?2)
            ON CONFLICT(user_id) DO UPDATE SET
                visible_on_leaderboard = excluded.visible_on_leaderboard,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(user_id.as_str())
                    .bind(if visible { 1_i64 } else { 0_i64 }),
                "Set leaderboard visibility",
            )
            .await?;

        self.fetch_existing(user_id, "Load ledger after visibility change")
            .await
    }

    async fn find_all(&self) -> Result<Vec<WellnessLedgerEntry>, DomainError> {
        let query = format!("{} ORDER BY seq ASC", SELECT_LEDGER);

        let rows: Vec<LedgerRow> = self
            .base
            .fetch_all(sqlx::query_as(&query), "Find all ledgers")
            .await?;

        Ok(rows.into_iter().map(LedgerRow::into_entry).collect())
    }
}
