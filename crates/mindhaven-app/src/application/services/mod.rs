mod config_service;
mod streak_service;
mod task_assigner;
mod user_locks;

pub use config_service::{ConfigService, LogLevel};
pub use streak_service::StreakService;
pub use task_assigner::TaskAssigner;
pub use user_locks::UserWriteLocks;
