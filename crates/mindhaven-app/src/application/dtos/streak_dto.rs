use serde::{Deserialize, Serialize};

use mindhaven_domain::streak::{StreakOverride, StreakState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakStateDto {
    pub user_id: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_active_date: Option<String>, // YYYY-MM-DD
    pub broken: bool,
    pub restored: bool,
}

impl StreakStateDto {
    pub fn from_state(user_id: &str, state: &StreakState) -> Self {
        Self {
            user_id: user_id.to_string(),
            current_streak: state.current_streak,
            longest_streak: state.longest_streak,
            last_active_date: state.last_active_date.map(|d| d.to_string()),
            broken: state.broken,
            restored: state.restored,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakRestoreDto {
    pub user_id: String,
    pub restored_streak: u32,
    pub anchor_date: String,
}

impl StreakRestoreDto {
    pub fn from_override(user_id: &str, grant: &StreakOverride) -> Self {
        Self {
            user_id: user_id.to_string(),
            restored_streak: grant.current_streak,
            anchor_date: grant.anchor.to_string(),
        }
    }
}
