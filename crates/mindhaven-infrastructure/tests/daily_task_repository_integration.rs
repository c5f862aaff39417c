use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use mindhaven_domain::check_in::DateKey;
use mindhaven_domain::daily_task::{default_task_pool, DailyTaskRepository, DailyTaskSet};
use mindhaven_domain::shared::UserId;
use mindhaven_infrastructure::persistence::repositories::SqliteDailyTaskRepository;

mod test_helpers;

fn draw(seed: u64) -> DailyTaskSet {
    let mut rng = StdRng::seed_from_u64(seed);
    DailyTaskSet::draw(
        UserId::from_string("user-1"),
        DateKey::parse("2024-01-05").expect("date"),
        &default_task_pool(),
        &mut rng,
    )
    .expect("draw")
}

#[tokio::test]
async fn daily_tasks_create_if_absent_returns_first_writer() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteDailyTaskRepository::new(Arc::new(pool));

    let first = repo.create_if_absent(&draw(1)).await.expect("create");
    let second = repo.create_if_absent(&draw(2)).await.expect("create again");

    assert_eq!(first, second);
    assert_eq!(second.tasks(), draw(1).tasks());
}

#[tokio::test]
async fn daily_tasks_update_is_compare_and_swap() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteDailyTaskRepository::new(Arc::new(pool));
    let stored = repo.create_if_absent(&draw(1)).await.expect("create");

    let mut writer_a = stored.clone();
    writer_a.visit(0).expect("visit");
    let mut writer_b = stored.clone();
    writer_b.visit(1).expect("visit");

    assert!(repo.update_if_revision(&writer_a).await.expect("update a"));
    assert!(!repo.update_if_revision(&writer_b).await.expect("update b"));

    let current = repo
        .find(stored.user_id(), stored.date())
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(current.revision(), 1);
    assert!(current.tasks()[0].visited);
    assert!(!current.tasks()[1].visited);
}

#[tokio::test]
async fn daily_tasks_are_keyed_by_date() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteDailyTaskRepository::new(Arc::new(pool));
    repo.create_if_absent(&draw(1)).await.expect("create");

    let other_day = repo
        .find(
            &UserId::from_string("user-1"),
            DateKey::parse("2024-01-06").expect("date"),
        )
        .await
        .expect("find");

    assert!(other_day.is_none());
}
