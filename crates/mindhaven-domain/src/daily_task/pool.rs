use serde::{Deserialize, Serialize};

/// Number of tasks drawn for each user each day.
pub const TASKS_PER_DAY: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub label: String,
    /// Route the user is sent to; navigating there marks the task visited.
    pub target_route: String,
}

impl TaskTemplate {
    pub fn new(label: impl Into<String>, target_route: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target_route: target_route.into(),
        }
    }
}

pub fn default_task_pool() -> Vec<TaskTemplate> {
    vec![
        TaskTemplate::new("Do a 2 minute meditation", "/Game"),
        TaskTemplate::new("Do a 3 minute meditation", "/Game"),
        TaskTemplate::new("Do a 4 minute meditation", "/Game"),
        TaskTemplate::new("Do a 5 minute meditation", "/Game"),
        TaskTemplate::new("Read an article on CBT", "/library"),
        TaskTemplate::new("Watch a video on Resilience", "/library"),
        TaskTemplate::new("Try an exercise on Mindfulness", "/library"),
    ]
}
