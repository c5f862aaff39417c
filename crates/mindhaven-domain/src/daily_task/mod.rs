mod aggregate;
mod pool;
mod repository;


pub use aggregate::{DailyTask, DailyTaskSet, TaskTransition};
pub use pool::{default_task_pool, TaskTemplate, TASKS_PER_DAY};
pub use repository::DailyTaskRepository;
