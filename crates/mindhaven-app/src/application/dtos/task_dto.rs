use serde::{Deserialize, Serialize};

use mindhaven_domain::daily_task::DailyTaskSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTaskDto {
    pub index: usize,
    pub label: String,
    pub target_route: String,
    pub visited: bool,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTaskSetDto {
    pub user_id: String,
    pub date: String,
    pub tasks: Vec<DailyTaskDto>,
    pub completed: usize,
}

impl From<&DailyTaskSet> for DailyTaskSetDto {
    fn from(set: &DailyTaskSet) -> Self {
        Self {
            user_id: set.user_id().to_string(),
            date: set.date().to_string(),
            tasks: set
                .tasks()
                .iter()
                .enumerate()
                .map(|(index, task)| DailyTaskDto {
                    index,
                    label: task.label.clone(),
                    target_route: task.target_route.clone(),
                    visited: task.visited,
                    done: task.done,
                })
                .collect(),
            completed: set.completed_count(),
        }
    }
}

/// Outcome of a visit/complete/uncomplete action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskActionResultDto {
    pub tasks: DailyTaskSetDto,
    /// Points credited (+) or debited (-) by this action.
    pub points_delta: i64,
    /// Ledger balance after the action; absent when no points moved.
    pub balance: Option<i64>,
}
