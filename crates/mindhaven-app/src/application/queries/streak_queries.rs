use std::sync::Arc;

use crate::application::dtos::StreakStateDto;
use crate::application::services::StreakService;
use mindhaven_domain::shared::{DomainError, UserId};

pub struct StreakQueries {
    streak_service: Arc<StreakService>,
}

impl StreakQueries {
    pub fn new(streak_service: Arc<StreakService>) -> Self {
        Self { streak_service }
    }

    /// Current streak state. Also persists a raised watermark and consumes a
    /// pending restore override.
    pub async fn get_streak_state(&self, user_id: &str) -> Result<StreakStateDto, DomainError> {
        let state = self
            .streak_service
            .current_state(&UserId::from_string(user_id))
            .await?;
        Ok(StreakStateDto::from_state(user_id, &state))
    }
}
