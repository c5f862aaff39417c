use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use mindhaven_domain::check_in::DateKey;
use mindhaven_domain::shared::{DomainError, UserId};
use mindhaven_domain::streak::{StreakOverride, StreakProgress, StreakProgressRepository};

#[derive(FromRow)]
struct StreakProgressRow {
    user_id: String,
    highest_streak: i64,
    restored_for: Option<String>,
    override_streak: Option<i64>,
    override_anchor: Option<String>,
}

fn to_streak(value: i64, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::Serialization(format!("Invalid {} value: {}", column, value))
    })
}

impl StreakProgressRow {
    fn into_progress(self) -> Result<StreakProgress, DomainError> {
        let restored_for = self
            .restored_for
            .as_deref()
            .map(DateKey::parse)
            .transpose()?;

        let pending_override = match (self.override_streak, self.override_anchor.as_deref()) {
            (Some(streak), Some(anchor)) => Some(StreakOverride {
                current_streak: to_streak(streak, "override_streak")?,
                anchor: DateKey::parse(anchor)?,
            }),
            _ => None,
        };

        Ok(StreakProgress::restore(
            UserId::from_string(&self.user_id),
            to_streak(self.highest_streak, "highest_streak")?,
            restored_for,
            pending_override,
        ))
    }
}

pub struct SqliteStreakProgressRepository {
    base: SqliteRepositoryBase,
}

impl SqliteStreakProgressRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl StreakProgressRepository for SqliteStreakProgressRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StreakProgress>, DomainError> {
        let query = r#"
            SELECT user_id, highest_streak, restored_for, override_streak, override_anchor
            FROM streak_progress
            WHERE user_id = ?1
        "#;

        let row: Option<StreakProgressRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query).bind(user_id.as_str()),
                "Find streak progress",
            )
            .await?;

        row.map(StreakProgressRow::into_progress).transpose()
    }

    async fn save(&self, progress: &StreakProgress) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO streak_progress
                (user_id, highest_streak, restored_for, override_streak, override_anchor)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id) DO UPDATE SET
                highest_streak = MAX(streak_progress.highest_streak, excluded.highest_streak),
                restored_for = excluded.restored_for,
                override_streak = excluded.override_streak,
                override_anchor = excluded.override_anchor,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        "#;

        let pending = progress.pending_override();

        self.base
            .execute(
                sqlx::query(query)
                    .bind(progress.user_id().as_str())
                    .bind(i64::from(progress.highest_streak()))
                    .bind(progress.restored_for().map(|d| d.to_string()))
                    .bind(pending.map(|o| i64::from(o.current_streak)))
                    .bind(pending.map(|o| o.anchor.to_string())),
                "Save streak progress",
            )
            .await?;

        Ok(())
    }
}
