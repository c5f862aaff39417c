//! End-to-end flows through the public command functions on an in-memory store.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::Arc;

use mindhaven_domain::daily_task::default_task_pool;
use mindhaven_domain::shared::FixedClock;
use mindhaven_infrastructure::persistence::Database;
use mindhaven_lib::application::commands::check_in_commands::RecordCheckInCommand;
use mindhaven_lib::application::config::EngagementConfig;
use mindhaven_lib::application::services::ConfigService;
use mindhaven_lib::presentation::bootstrap::build_app_state_with;
use mindhaven_lib::presentation::commands;
use mindhaven_lib::presentation::state::AppState;

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap()
}

async fn app_at(now: DateTime<Utc>) -> AppState {
    let database = Database::in_memory().await.expect("in-memory database");
    build_app_state_with(
        database,
        ConfigService::in_memory(EngagementConfig::default()),
        Arc::new(FixedClock(now)),
        default_task_pool(),
    )
    .await
    .expect("app state")
}

async fn check_in(state: &AppState, user: &str, when: DateTime<Utc>, rating: u8) {
    commands::record_check_in(
        state,
        RecordCheckInCommand {
            user_id: user.to_string(),
            timestamp_millis: Some(when.timestamp_millis()),
            mood_rating: rating,
            mood_label: None,
            description: None,
        },
    )
    .await
    .expect("check-in");
}

#[tokio::test]
async fn test_broken_streak_can_be_restored_once() {
    let state = app_at(at(1, 6, 12)).await;
    for day in 1..=3 {
        check_in(&state, "alice", at(1, day, 9), 4).await;
    }

    let broken = commands::get_streak_state(&state, "alice").await.unwrap();
    assert!(broken.broken);
    assert_eq!(broken.current_streak, 0);
    assert_eq!(broken.longest_streak, 3);
    assert_eq!(broken.last_active_date.as_deref(), Some("2024-01-03"));

    let grant = commands::restore_streak(&state, "alice").await.unwrap();
    assert_eq!(grant.restored_streak, 3);

    let restored = commands::get_streak_state(&state, "alice").await.unwrap();
    assert!(restored.restored);
    assert_eq!(restored.current_streak, 3);

    let second = commands::restore_streak(&state, "alice").await.unwrap_err();
    assert_eq!(second.code, 3001);
}

#[tokio::test]
async fn test_live_streak_counts_yesterday() {
    let state = app_at(at(1, 5, 12)).await;
    for day in [1, 2, 3, 4] {
        check_in(&state, "bob", at(1, day, 20), 3).await;
    }

    let streak = commands::get_streak_state(&state, "bob").await.unwrap();

    assert!(!streak.broken);
    assert_eq!(streak.current_streak, 4);
}

#[tokio::test]
async fn test_completing_tasks_moves_the_leaderboard() {
    let state = app_at(at(2, 10, 12)).await;
    commands::register_ledger(&state, "alice", Some("Alice".to_string()))
        .await
        .unwrap();
    commands::register_ledger(&state, "bob", None).await.unwrap();

    let tasks = commands::get_daily_tasks(&state, "bob").await.unwrap();
    assert_eq!(tasks.tasks.len(), 3);
    let labels: HashSet<_> = tasks.tasks.iter().map(|t| t.label.clone()).collect();
    assert_eq!(labels.len(), 3);

    // Same set on every read for the day
    let again = commands::get_daily_tasks(&state, "bob").await.unwrap();
    assert_eq!(
        tasks.tasks.iter().map(|t| &t.label).collect::<Vec<_>>(),
        again.tasks.iter().map(|t| &t.label).collect::<Vec<_>>()
    );

    commands::visit_task(&state, "bob", 1).await.unwrap();
    let done = commands::complete_task(&state, "bob", 1).await.unwrap();
    assert_eq!(done.balance, Some(100));

    let board = commands::get_leaderboard(&state).await.unwrap();
    assert_eq!(board[0].user_id, "bob");
    assert_eq!(board[0].points, 100);
    assert_eq!(board[1].name, "Alice");

    let undone = commands::uncomplete_task(&state, "bob", 1).await.unwrap();
    assert_eq!(undone.balance, Some(0));

    // Tie at zero keeps creation order
    let board = commands::get_leaderboard(&state).await.unwrap();
    assert_eq!(board[0].user_id, "alice");
    assert_eq!(board[1].user_id, "bob");
}

#[tokio::test]
async fn test_hidden_user_keeps_points_but_leaves_ranking() {
    let state = app_at(at(2, 10, 12)).await;
    commands::award_engagement_points(&state, "carol").await.unwrap();
    commands::award_engagement_points(&state, "dave").await.unwrap();

    let position = commands::get_leaderboard_position(&state, "carol")
        .await
        .unwrap();
    assert_eq!(position.position, Some(1));

    let hidden = commands::set_leaderboard_visibility(&state, "carol", false)
        .await
        .unwrap();
    assert_eq!(hidden.points, 10);

    let position = commands::get_leaderboard_position(&state, "carol")
        .await
        .unwrap();
    assert_eq!(position.position, None);
    assert_eq!(position.total_ranked, 1);

    let ledger = commands::get_ledger(&state, "carol").await.unwrap();
    assert_eq!(ledger.points, 10);
}

#[tokio::test]
async fn test_analytics_snapshot_reflects_check_ins() {
    let state = app_at(at(3, 20, 12)).await;
    check_in(&state, "erin", at(3, 18, 9), 5).await;
    check_in(&state, "erin", at(3, 18, 21), 4).await;
    check_in(&state, "erin", at(3, 19, 9), 2).await;

    let snapshot = commands::get_analytics_snapshot(&state, "erin")
        .await
        .unwrap();

    assert_eq!(snapshot.heatmap.total, 3);
    assert_eq!(snapshot.longest_positive_run, 2);
    let summary = snapshot.summary.expect("summary");
    assert_eq!(summary.total_check_ins, 3);
    assert_eq!(summary.last_check_in.to_string(), "2024-03-19");
}

#[tokio::test]
async fn test_new_user_gets_empty_views() {
    let state = app_at(at(3, 20, 12)).await;

    let streak = commands::get_streak_state(&state, "nobody").await.unwrap();
    assert_eq!(streak.current_streak, 0);
    assert!(!streak.broken);

    let snapshot = commands::get_analytics_snapshot(&state, "nobody")
        .await
        .unwrap();
    assert!(snapshot.summary.is_none());
    assert!(snapshot.weekly_trend.is_empty());

    let ledger = commands::get_ledger(&state, "nobody").await.unwrap();
    assert_eq!(ledger.points, 0);
    assert!(ledger.visible_on_leaderboard);
    assert_eq!(ledger.display_name, None);

    // The lazily created ledger is a real zero-baseline entry.
    let awarded = commands::award_engagement_points(&state, "nobody")
        .await
        .unwrap();
    assert_eq!(awarded.balance, 10);
    let ledger = commands::get_ledger(&state, "nobody").await.unwrap();
    assert_eq!(ledger.points, 10);
}

#[tokio::test]
async fn test_blank_user_id_is_rejected() {
    let state = app_at(at(3, 20, 12)).await;
    let err = commands::get_daily_tasks(&state, "   ").await.unwrap_err();
    assert_eq!(err.code, 6001);
}

#[tokio::test]
async fn test_complete_before_visit_is_rejected() {
    let state = app_at(at(3, 20, 12)).await;
    let err = commands::complete_task(&state, "frank", 0).await.unwrap_err();
    assert_eq!(err.code, 3001);
    assert!(!err.recoverable);
}
