use std::sync::Arc;

use mindhaven_domain::check_in::{sanitize, CheckInRecord, CheckInRepository, MoodCategory};
use mindhaven_domain::shared::UserId;
use mindhaven_infrastructure::persistence::repositories::SqliteCheckInRepository;

mod test_helpers;

#[tokio::test]
async fn check_ins_are_listed_oldest_first_per_user() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));
    let user = UserId::from_string("user-1");

    for (ts, rating) in [(3_000, 5), (1_000, 2), (2_000, 4)] {
        let record = CheckInRecord::new(user.clone(), ts, rating, None, Some("note".to_string()))
            .expect("valid check-in");
        repo.append(&record).await.expect("append");
    }
    let other = CheckInRecord::new(UserId::from_string("user-2"), 500, 3, None, None)
        .expect("valid check-in");
    repo.append(&other).await.expect("append");

    let records = sanitize(repo.list_by_user(&user).await.expect("list"));

    let stamps: Vec<i64> = records.iter().map(|r| r.timestamp_millis()).collect();
    assert_eq!(stamps, vec![1_000, 2_000, 3_000]);
    assert_eq!(records[1].mood(), MoodCategory::Good);
    assert_eq!(records[0].description(), Some("note"));
}

#[tokio::test]
async fn malformed_rows_are_dropped_on_sanitize() {
    let pool = test_helpers::setup_in_memory_db().await;

    sqlx::query(
        "INSERT INTO check_ins (user_id, timestamp_millis, mood_rating, mood_label) VALUES
            ('user-1', 1000, 4, 'good'),
            ('user-1', NULL, 3, 'Neutral'),
            ('user-1', 2000, NULL, 'Poor'),
            ('user-1', 3000, 7, 'Good'),
            ('user-1', 4000, 1, 'unheard-of')",
    )
    .execute(&pool)
    .await
    .expect("insert raw rows");

    let repo = SqliteCheckInRepository::new(Arc::new(pool));
    let raw = repo
        .list_by_user(&UserId::from_string("user-1"))
        .await
        .expect("list");
    assert_eq!(raw.len(), 5);

    let records = sanitize(raw);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].mood(), MoodCategory::Good);
    assert_eq!(records[1].mood(), MoodCategory::VeryPoor);
}
