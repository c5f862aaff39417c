mod check_in_dto;
mod leaderboard_dto;
mod streak_dto;
mod task_dto;

pub use check_in_dto::*;
pub use leaderboard_dto::*;
pub use streak_dto::*;
pub use task_dto::*;
