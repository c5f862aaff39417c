use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::queries::{AnalyticsQueries, LeaderboardQueries, StreakQueries, TaskQueries};
use crate::application::services::{ConfigService, StreakService, TaskAssigner, UserWriteLocks};
use crate::presentation::state::{
    AppState, CommandHandlers, Queries, Repositories, Runtime, Services,
};
use mindhaven_domain::analytics::AnalyticsAggregator;
use mindhaven_domain::check_in::CheckInRepository;
use mindhaven_domain::daily_task::{default_task_pool, DailyTaskRepository, TaskTemplate};
use mindhaven_domain::ledger::LedgerRepository;
use mindhaven_domain::shared::{Clock, SystemClock};
use mindhaven_domain::streak::{StreakProgressRepository, StreakTracker};
use mindhaven_infrastructure::logging::init_logger;
use mindhaven_infrastructure::persistence::{
    repositories::{
        SqliteCheckInRepository, SqliteDailyTaskRepository, SqliteLedgerRepository,
        SqliteStreakProgressRepository,
    },
    Database,
};

/// Build the engine on top of `data_dir` (database and logs) using the
/// platform config directory.
pub async fn build_app_state(data_dir: &Path) -> Result<AppState, Box<dyn std::error::Error>> {
    let startup_started_at = Instant::now();

    std::fs::create_dir_all(data_dir)
        .map_err(|e| format!("Failed to create data directory: {}", e))?;

    let config_dir = ConfigService::default_config_dir().unwrap_or_else(|| data_dir.join("config"));
    let config_service = ConfigService::new(&config_dir)?;

    init_logger(
        data_dir.join("logs"),
        config_service.get_log_level().as_str(),
    )?;

    let db_filename = if cfg!(debug_assertions) {
        "mindhaven-dev.db"
    } else {
        "mindhaven.db"
    };
    let db_path = data_dir.join(db_filename);
    let db_path_str = db_path.to_str().ok_or("Invalid database path")?;

    info!("Database path: {}", db_path_str);

    info!("🔌 Connecting to database...");
    let started_at = Instant::now();
    let database = Database::new(db_path_str).await?;
    info!(
        "✓ Database connection established ({}ms)",
        started_at.elapsed().as_millis()
    );

    let state = build_app_state_with(
        database,
        config_service,
        Arc::new(SystemClock),
        default_task_pool(),
    )
    .await?;

    info!(
        "✓ Engagement engine ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );
    Ok(state)
}

/// Migrate `database` and wire every repository, service, query and handler.
pub async fn build_app_state_with(
    database: Database,
    config_service: ConfigService,
    clock: Arc<dyn Clock>,
    task_pool: Vec<TaskTemplate>,
) -> Result<AppState, Box<dyn std::error::Error>> {
    info!("🔄 Running migrations...");
    let started_at = Instant::now();
    database.run_migrations().await?;
    info!(
        "✓ Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    let config = config_service.engagement().clone();
    config.validate()?;
    let day_clock = config.day_clock()?;

    let pool = Arc::new(database.pool().clone());
    let locks = Arc::new(UserWriteLocks::new());

    let check_in_repo =
        Arc::new(SqliteCheckInRepository::new(pool.clone())) as Arc<dyn CheckInRepository>;
    let ledger_repo =
        Arc::new(SqliteLedgerRepository::new(pool.clone())) as Arc<dyn LedgerRepository>;
    let daily_task_repo =
        Arc::new(SqliteDailyTaskRepository::new(pool.clone())) as Arc<dyn DailyTaskRepository>;
    let streak_progress_repo = Arc::new(SqliteStreakProgressRepository::new(pool.clone()))
        as Arc<dyn StreakProgressRepository>;

    let task_assigner = Arc::new(TaskAssigner::new(
        daily_task_repo.clone(),
        task_pool,
        clock.clone(),
        day_clock,
    ));
    let streak_service = Arc::new(StreakService::new(
        check_in_repo.clone(),
        streak_progress_repo.clone(),
        StreakTracker::new(day_clock),
        clock.clone(),
        locks.clone(),
    ));

    let queries = Queries {
        streak: Arc::new(StreakQueries::new(streak_service.clone())),
        analytics: Arc::new(AnalyticsQueries::new(
            check_in_repo.clone(),
            AnalyticsAggregator::new(day_clock),
            clock.clone(),
        )),
        leaderboard: Arc::new(LeaderboardQueries::new(ledger_repo.clone())),
        tasks: Arc::new(TaskQueries::new(task_assigner.clone())),
    };

    let command_handlers = CommandHandlers {
        tasks: Arc::new(TaskCommandHandler::new(
            task_assigner.clone(),
            daily_task_repo.clone(),
            ledger_repo.clone(),
            locks.clone(),
            config.task_completion_points,
            config.max_write_attempts,
        )),
        restore_streak: Arc::new(RestoreStreakCommandHandler::new(streak_service.clone())),
        award_engagement_points: Arc::new(AwardEngagementPointsCommandHandler::new(
            ledger_repo.clone(),
            config.engagement_reward_points,
        )),
        set_leaderboard_visibility: Arc::new(SetLeaderboardVisibilityCommandHandler::new(
            ledger_repo.clone(),
        )),
        register_ledger: Arc::new(RegisterLedgerCommandHandler::new(ledger_repo.clone())),
        record_check_in: Arc::new(RecordCheckInCommandHandler::new(
            check_in_repo.clone(),
            clock.clone(),
        )),
    };

    info!(
        "✓ Engagement engine wired utc_offset_minutes={} completion_points={} reward_points={}",
        config.utc_offset_minutes, config.task_completion_points, config.engagement_reward_points
    );

    Ok(AppState {
        runtime: Runtime {
            pool,
            db: Arc::new(database),
            clock,
            locks,
        },
        repositories: Repositories {
            check_in: check_in_repo,
            ledger: ledger_repo,
            daily_task: daily_task_repo,
            streak_progress: streak_progress_repo,
        },
        services: Services {
            config: Arc::new(config_service),
            task_assigner,
            streak: streak_service,
        },
        queries,
        command_handlers,
    })
}
