use serde::{Deserialize, Serialize};

use crate::application::commands::command_handler::Command;
use crate::application::dtos::CheckInDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCheckInCommand {
    pub user_id: String,
    /// Defaults to now.
    pub timestamp_millis: Option<i64>,
    pub mood_rating: u8,
    pub mood_label: Option<String>,
    pub description: Option<String>,
}

impl Command for RecordCheckInCommand {}

pub type RecordCheckInResult = CheckInDto;
