use std::sync::Arc;

use mindhaven_domain::check_in::DateKey;
use mindhaven_domain::shared::UserId;
use mindhaven_domain::streak::{
    evaluate_days, StreakProgress, StreakProgressRepository,
};
use mindhaven_infrastructure::persistence::repositories::SqliteStreakProgressRepository;

mod test_helpers;

fn day(s: &str) -> DateKey {
    DateKey::parse(s).expect("date")
}

#[tokio::test]
async fn streak_progress_round_trips_pending_override() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakProgressRepository::new(Arc::new(pool));
    let user = UserId::from_string("user-1");

    let mut progress = StreakProgress::new(user.clone());
    let live = evaluate_days(&[day("2024-01-01"), day("2024-01-02")], day("2024-01-06"));
    progress.grant_restore(&live).expect("restore");
    repo.save(&progress).await.expect("save");

    let loaded = repo
        .find_by_user(&user)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(loaded, progress);
    assert_eq!(loaded.restored_for(), Some(day("2024-01-02")));
    assert_eq!(
        loaded.pending_override().map(|o| o.current_streak),
        Some(2)
    );
}

#[tokio::test]
async fn streak_watermark_never_decreases() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakProgressRepository::new(Arc::new(pool));
    let user = UserId::from_string("user-1");

    repo.save(&StreakProgress::restore(user.clone(), 12, None, None))
        .await
        .expect("save high");
    repo.save(&StreakProgress::restore(user.clone(), 4, None, None))
        .await
        .expect("save stale");

    let loaded = repo
        .find_by_user(&user)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(loaded.highest_streak(), 12);
}
