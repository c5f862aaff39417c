use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use mindhaven_domain::check_in::{CheckInRecord, CheckInRepository, RawCheckIn};
use mindhaven_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct CheckInRow {
    user_id: String,
    timestamp_millis: Option<i64>,
    mood_rating: Option<i64>,
    mood_label: Option<String>,
    description: Option<String>,
}

impl CheckInRow {
    fn into_raw(self) -> RawCheckIn {
        RawCheckIn {
            user_id: UserId::from_string(&self.user_id),
            timestamp_millis: self.timestamp_millis,
            mood_rating: self.mood_rating,
            mood_label: self.mood_label,
            description: self.description,
        }
    }
}

pub struct SqliteCheckInRepository {
    base: SqliteRepositoryBase,
}

impl SqliteCheckInRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl CheckInRepository for SqliteCheckInRepository {
    async fn append(&self, record: &CheckInRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO check_ins (user_id, timestamp_millis, mood_rating, mood_label, description)
            VALUES (?1, ?2, ?3, ?4, ?5)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(record.user_id().as_str())
                    .bind(record.timestamp_millis())
                    .bind(i64::from(record.mood_rating()))
                    .bind(record.mood().label())
                    .bind(record.description()),
                "Append check-in",
            )
            .await?;

        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<RawCheckIn>, DomainError> {
        // Rows without a timestamp sort first; they are dropped on sanitize anyway.
        let query = r#"
            SELECT user_id, timestamp_millis, mood_rating, mood_label, description
            FROM check_ins
            WHERE user_id = ?1
            ORDER BY timestamp_millis ASC, id ASC
        "#;

        let rows: Vec<CheckInRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(user_id.as_str()),
                "List check-ins by user",
            )
            .await?;

        Ok(rows.into_iter().map(CheckInRow::into_raw).collect())
    }
}
