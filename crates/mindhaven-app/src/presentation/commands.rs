//! Entry points of the engagement engine.
//!
//! Each function validates its input, dispatches to a query or command
//! handler and maps domain failures into [`CommandError`].

use log::info;

use crate::application::commands::check_in_commands::RecordCheckInCommand;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::ledger_commands::*;
use crate::application::commands::streak_commands::RestoreStreakCommand;
use crate::application::commands::task_commands::*;
use crate::application::dtos::{
    CheckInDto, DailyTaskSetDto, LeaderboardEntryDto, LeaderboardPositionDto, StreakRestoreDto,
    StreakStateDto, TaskActionResultDto, WellnessLedgerDto,
};
use crate::application::services::LogLevel;
use crate::application::ResultExt;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use mindhaven_domain::analytics::AnalyticsSnapshot;

fn require_user(user_id: &str) -> Result<String, CommandError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(CommandError::validation("user_id must not be empty"));
    }
    Ok(trimmed.to_string())
}

// ============================================================
// Streaks
// ============================================================

pub async fn get_streak_state(
    state: &AppState,
    user_id: &str,
) -> Result<StreakStateDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state.queries.streak.get_streak_state(&user_id).await?)
}

pub async fn restore_streak(
    state: &AppState,
    user_id: &str,
) -> Result<StreakRestoreDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state
        .command_handlers
        .restore_streak
        .handle(RestoreStreakCommand { user_id })
        .await?)
}

// ============================================================
// Analytics
// ============================================================

pub async fn get_analytics_snapshot(
    state: &AppState,
    user_id: &str,
) -> Result<AnalyticsSnapshot, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state.queries.analytics.get_snapshot(&user_id).await)
}

pub async fn record_check_in(
    state: &AppState,
    command: RecordCheckInCommand,
) -> Result<CheckInDto, CommandError> {
    let user_id = require_user(&command.user_id)?;
    Ok(state
        .command_handlers
        .record_check_in
        .handle(RecordCheckInCommand { user_id, ..command })
        .await?)
}

// ============================================================
// Daily tasks
// ============================================================

pub async fn get_daily_tasks(
    state: &AppState,
    user_id: &str,
) -> Result<DailyTaskSetDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state.queries.tasks.get_daily_tasks(&user_id).await?)
}

pub async fn visit_task(
    state: &AppState,
    user_id: &str,
    task_index: usize,
) -> Result<TaskActionResultDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state
        .command_handlers
        .tasks
        .handle(VisitTaskCommand {
            user_id,
            task_index,
        })
        .await?)
}

pub async fn complete_task(
    state: &AppState,
    user_id: &str,
    task_index: usize,
) -> Result<TaskActionResultDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state
        .command_handlers
        .tasks
        .handle(CompleteTaskCommand {
            user_id,
            task_index,
        })
        .await?)
}

pub async fn uncomplete_task(
    state: &AppState,
    user_id: &str,
    task_index: usize,
) -> Result<TaskActionResultDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state
        .command_handlers
        .tasks
        .handle(UncompleteTaskCommand {
            user_id,
            task_index,
        })
        .await?)
}

// ============================================================
// Ledger and leaderboard
// ============================================================

pub async fn register_ledger(
    state: &AppState,
    user_id: &str,
    display_name: Option<String>,
) -> Result<WellnessLedgerDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state
        .command_handlers
        .register_ledger
        .handle(RegisterLedgerCommand {
            user_id,
            display_name,
        })
        .await?)
}

pub async fn get_ledger(
    state: &AppState,
    user_id: &str,
) -> Result<WellnessLedgerDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state.queries.leaderboard.get_ledger(&user_id).await?)
}

pub async fn award_engagement_points(
    state: &AppState,
    user_id: &str,
) -> Result<AwardEngagementPointsResult, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state
        .command_handlers
        .award_engagement_points
        .handle(AwardEngagementPointsCommand { user_id })
        .await?)
}

pub async fn set_leaderboard_visibility(
    state: &AppState,
    user_id: &str,
    visible: bool,
) -> Result<WellnessLedgerDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state
        .command_handlers
        .set_leaderboard_visibility
        .handle(SetLeaderboardVisibilityCommand { user_id, visible })
        .await?)
}

pub async fn get_leaderboard(state: &AppState) -> Result<Vec<LeaderboardEntryDto>, CommandError> {
    Ok(state.queries.leaderboard.get_leaderboard().await?)
}

pub async fn get_leaderboard_position(
    state: &AppState,
    user_id: &str,
) -> Result<LeaderboardPositionDto, CommandError> {
    let user_id = require_user(user_id)?;
    Ok(state
        .queries
        .leaderboard
        .get_leaderboard_position(&user_id)
        .await?)
}

// ============================================================
// Config
// ============================================================

pub fn get_log_level(state: &AppState) -> LogLevel {
    state.services.config.get_log_level()
}

pub fn set_log_level(state: &AppState, level: LogLevel) -> Result<(), CommandError> {
    info!("=== set_log_level command called: {} ===", level.as_str());
    state
        .services
        .config
        .set_log_level(level)
        .to_infra_err()?;
    Ok(())
}
