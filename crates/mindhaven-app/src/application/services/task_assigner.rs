use log::info;
use std::sync::Arc;

use mindhaven_domain::check_in::{DateKey, DayClock};
use mindhaven_domain::daily_task::{DailyTaskRepository, DailyTaskSet, TaskTemplate};
use mindhaven_domain::shared::{Clock, DomainError, UserId};

/// Hands out each user's three tasks for a day, drawing them at most once.
pub struct TaskAssigner {
    repo: Arc<dyn DailyTaskRepository>,
    pool: Vec<TaskTemplate>,
    clock: Arc<dyn Clock>,
    day_clock: DayClock,
}

impl TaskAssigner {
    pub fn new(
        repo: Arc<dyn DailyTaskRepository>,
        pool: Vec<TaskTemplate>,
        clock: Arc<dyn Clock>,
        day_clock: DayClock,
    ) -> Self {
        Self {
            repo,
            pool,
            clock,
            day_clock,
        }
    }

    pub fn today(&self) -> DateKey {
        self.day_clock.date_key(self.clock.now())
    }

    /// Today's set drawn from the configured pool.
    pub async fn today_tasks(&self, user_id: &UserId) -> Result<DailyTaskSet, DomainError> {
        self.get_or_create_daily_tasks(user_id, self.today(), &self.pool)
            .await
    }

    /// Existing set for `(user, date)` or a fresh draw.
    ///
    /// Concurrent callers race on an insert-if-absent, so every caller sees
    /// the same winning set.
    pub async fn get_or_create_daily_tasks(
        &self,
        user_id: &UserId,
        date: DateKey,
        pool: &[TaskTemplate],
    ) -> Result<DailyTaskSet, DomainError> {
        if let Some(existing) = self.repo.find(user_id, date).await? {
            return Ok(existing);
        }

        let drawn = {
            let mut rng = rand::thread_rng();
            DailyTaskSet::draw(user_id.clone(), date, pool, &mut rng)?
        };

        let stored = self.repo.create_if_absent(&drawn).await?;
        if stored.tasks() == drawn.tasks() {
            info!("[tasks] assigned daily tasks user_id={} date={}", user_id, date);
        } else {
            info!(
                "[tasks] lost assignment race, using stored set user_id={} date={}",
                user_id, date
            );
        }
        Ok(stored)
    }
}
