use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::{ResultExt, SqliteRepositoryBase};
use mindhaven_domain::check_in::DateKey;
use mindhaven_domain::daily_task::{DailyTask, DailyTaskRepository, DailyTaskSet};
use mindhaven_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct DailyTaskSetRow {
    user_id: String,
    task_date: String,
    tasks: String,
    revision: i64,
}

impl DailyTaskSetRow {
    fn into_task_set(self) -> Result<DailyTaskSet, DomainError> {
        let date = DateKey::parse(&self.task_date)?;
        let tasks: Vec<DailyTask> =
            serde_json::from_str(&self.tasks).map_repo_error("Decode daily tasks")?;

        Ok(DailyTaskSet::restore(
            UserId::from_string(&self.user_id),
            date,
            tasks,
            self.revision,
        ))
    }
}

pub struct SqliteDailyTaskRepository {
    base: SqliteRepositoryBase,
}

impl SqliteDailyTaskRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl DailyTaskRepository for SqliteDailyTaskRepository {
    async fn find(
        &self,
        user_id: &UserId,
        date: DateKey,
    ) -> Result<Option<DailyTaskSet>, DomainError> {
        let query = r#"
            SELECT user_id, task_date, tasks, revision
            FROM daily_task_sets
            WHERE user_id = ?1 AND task_date = ?2
        "#;

        let row: Option<DailyTaskSetRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(date.to_string()),
                "Find daily tasks",
            )
            .await?;

        row.map(DailyTaskSetRow::into_task_set).transpose()
    }

    async fn create_if_absent(&self, set: &DailyTaskSet) -> Result<DailyTaskSet, DomainError> {
        let tasks = serde_json::to_string(set.tasks()).map_repo_error("Encode daily tasks")?;
        let query = r#"
            INSERT INTO daily_task_sets (user_id, task_date, tasks, revision)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id, task_date) DO NOTHING
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(set.user_id().as_str())
                    .bind(set.date().to_string())
                    .bind(tasks)
                    .bind(set.revision()),
                "Create daily tasks",
            )
            .await?;

        self.find(set.user_id(), set.date()).await?.ok_or_else(|| {
            DomainError::StoreUnavailable(format!(
                "Daily tasks for user {} on {} vanished after insert",
                set.user_id(),
                set.date()
            ))
        })
    }

    async fn update_if_revision(&self, set: &DailyTaskSet) -> Result<bool, DomainError> {
        let tasks = serde_json::to_string(set.tasks()).map_repo_error("Encode daily tasks")?;
        let query = r#"
            UPDATE daily_task_sets
            SET tasks = ?1,
                revision = revision + 1,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE user_id = ?2 AND task_date = ?3 AND revision = ?4
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(tasks)
                    .bind(set.user_id().as_str())
                    .bind(set.date().to_string())
                    .bind(set.revision()),
                "Update daily tasks",
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
