mod analytics_queries;
mod leaderboard_queries;
mod streak_queries;
mod task_queries;

pub use analytics_queries::AnalyticsQueries;
pub use leaderboard_queries::LeaderboardQueries;
pub use streak_queries::StreakQueries;
pub use task_queries::TaskQueries;
