use std::sync::Arc;

use crate::application::dtos::DailyTaskSetDto;
use crate::application::services::TaskAssigner;
use mindhaven_domain::shared::{DomainError, UserId};

pub struct TaskQueries {
    assigner: Arc<TaskAssigner>,
}

impl TaskQueries {
    pub fn new(assigner: Arc<TaskAssigner>) -> Self {
        Self { assigner }
    }

    /// Today's tasks, drawn on first request of the day.
    pub async fn get_daily_tasks(&self, user_id: &str) -> Result<DailyTaskSetDto, DomainError> {
        let set = self
            .assigner
            .today_tasks(&UserId::from_string(user_id))
            .await?;
        Ok(DailyTaskSetDto::from(&set))
    }
}
