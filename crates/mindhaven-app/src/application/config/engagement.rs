use serde::{Deserialize, Serialize};

use crate::application::services::LogLevel;
use mindhaven_domain::check_in::DayClock;
use mindhaven_domain::ledger::{ENGAGEMENT_REWARD_POINTS, TASK_COMPLETION_POINTS};
use mindhaven_domain::shared::DomainError;

/// Tunables for the engagement engine, persisted as `engagement_config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    /// Zone used to turn timestamps into calendar days for this session.
    pub utc_offset_minutes: i32,
    pub task_completion_points: i64,
    pub engagement_reward_points: i64,
    /// Optimistic-concurrency retry budget for task set writes.
    pub max_write_attempts: u32,
    pub log_level: LogLevel,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            task_completion_points: TASK_COMPLETION_POINTS,
            engagement_reward_points: ENGAGEMENT_REWARD_POINTS,
            max_write_attempts: 3,
            log_level: LogLevel::Info,
        }
    }
}

impl EngagementConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.day_clock()?;
        if self.task_completion_points <= 0 {
            return Err(DomainError::Validation(
                "task_completion_points must be positive".to_string(),
            ));
        }
        if self.engagement_reward_points <= 0 {
            return Err(DomainError::Validation(
                "engagement_reward_points must be positive".to_string(),
            ));
        }
        if self.max_write_attempts == 0 {
            return Err(DomainError::Validation(
                "max_write_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn day_clock(&self) -> Result<DayClock, DomainError> {
        DayClock::with_offset_minutes(self.utc_offset_minutes)
    }
}
