use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::queries::{AnalyticsQueries, LeaderboardQueries, StreakQueries, TaskQueries};
use crate::application::services::{ConfigService, StreakService, TaskAssigner, UserWriteLocks};
use mindhaven_domain::check_in::CheckInRepository;
use mindhaven_domain::daily_task::DailyTaskRepository;
use mindhaven_domain::ledger::LedgerRepository;
use mindhaven_domain::shared::Clock;
use mindhaven_domain::streak::StreakProgressRepository;
use mindhaven_infrastructure::persistence::Database;

/// Command handlers container
pub struct CommandHandlers {
    pub tasks: Arc<TaskCommandHandler>,
    pub restore_streak: Arc<RestoreStreakCommandHandler>,
    pub award_engagement_points: Arc<AwardEngagementPointsCommandHandler>,
    pub set_leaderboard_visibility: Arc<SetLeaderboardVisibilityCommandHandler>,
    pub register_ledger: Arc<RegisterLedgerCommandHandler>,
    pub record_check_in: Arc<RecordCheckInCommandHandler>,
}

pub struct Runtime {
    pub pool: Arc<SqlitePool>,
    pub db: Arc<Database>,
    pub clock: Arc<dyn Clock>,
    pub locks: Arc<UserWriteLocks>,
}

pub struct Repositories {
    pub check_in: Arc<dyn CheckInRepository>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub daily_task: Arc<dyn DailyTaskRepository>,
    pub streak_progress: Arc<dyn StreakProgressRepository>,
}

pub struct Services {
    pub config: Arc<ConfigService>,
    pub task_assigner: Arc<TaskAssigner>,
    pub streak: Arc<StreakService>,
}

pub struct Queries {
    pub streak: Arc<StreakQueries>,
    pub analytics: Arc<AnalyticsQueries>,
    pub leaderboard: Arc<LeaderboardQueries>,
    pub tasks: Arc<TaskQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

impl AppState {
    pub async fn new(data_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        crate::presentation::bootstrap::build_app_state(data_dir).await
    }
}
