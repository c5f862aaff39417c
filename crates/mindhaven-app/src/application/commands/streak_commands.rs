use serde::{Deserialize, Serialize};

use crate::application::commands::command_handler::Command;
use crate::application::dtos::StreakRestoreDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreStreakCommand {
    pub user_id: String,
}

impl Command for RestoreStreakCommand {}

pub type RestoreStreakResult = StreakRestoreDto;
