use serde::{Deserialize, Serialize};

use crate::application::commands::command_handler::Command;
use crate::application::dtos::TaskActionResultDto;

// ============================================================
// Visit Task Command
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitTaskCommand {
    pub user_id: String,
    pub task_index: usize,
}

impl Command for VisitTaskCommand {}

// ============================================================
// Complete Task Command
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteTaskCommand {
    pub user_id: String,
    pub task_index: usize,
}

impl Command for CompleteTaskCommand {}

// ============================================================
// Uncomplete Task Command
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncompleteTaskCommand {
    pub user_id: String,
    pub task_index: usize,
}

impl Command for UncompleteTaskCommand {}

pub type TaskActionResult = TaskActionResultDto;
