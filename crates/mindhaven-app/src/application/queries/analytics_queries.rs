use log::{info, warn};
use std::sync::Arc;

use mindhaven_domain::analytics::{AnalyticsAggregator, AnalyticsSnapshot};
use mindhaven_domain::check_in::{sanitize, CheckInRepository};
use mindhaven_domain::shared::{Clock, UserId};

pub struct AnalyticsQueries {
    check_in_repo: Arc<dyn CheckInRepository>,
    aggregator: AnalyticsAggregator,
    clock: Arc<dyn Clock>,
}

impl AnalyticsQueries {
    pub fn new(
        check_in_repo: Arc<dyn CheckInRepository>,
        aggregator: AnalyticsAggregator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            check_in_repo,
            aggregator,
            clock,
        }
    }

    /// Dashboard snapshot for a user.
    ///
    /// Never fails: when check-ins cannot be fetched the empty snapshot is
    /// returned so the dashboard still renders.
    pub async fn get_snapshot(&self, user_id: &str) -> AnalyticsSnapshot {
        let now = self.clock.now();
        let user_id = UserId::from_string(user_id);

        let raws = match self.check_in_repo.list_by_user(&user_id).await {
            Ok(raws) => raws,
            Err(e) => {
                warn!(
                    "[analytics] check-in fetch failed, serving empty snapshot user_id={} err={}",
                    user_id, e
                );
                return self.aggregator.empty_snapshot(now);
            }
        };

        let records = sanitize(raws);
        let snapshot = self.aggregator.snapshot(&records, now);

        info!(
            "[analytics] snapshot user_id={} check_ins={} weeks={} heatmap_total={}",
            user_id,
            records.len(),
            snapshot.weekly_trend.len(),
            snapshot.heatmap.total
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use mindhaven_domain::check_in::{CheckInRecord, DayClock, RawCheckIn};
    use mindhaven_domain::shared::{DomainError, FixedClock};
    use mockall::mock;

    mock! {
        CheckIns {}

        #[async_trait]
        impl CheckInRepository for CheckIns {
            async fn append(&self, record: &CheckInRecord) -> Result<(), DomainError>;
            async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<RawCheckIn>, DomainError>;
        }
    }

    fn queries(repo: MockCheckIns) -> AnalyticsQueries {
        AnalyticsQueries::new(
            Arc::new(repo),
            AnalyticsAggregator::new(DayClock::utc()),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap())),
        )
    }

    #[tokio::test]
    async fn test_fetch_failure_serves_empty_snapshot() {
        let mut repo = MockCheckIns::new();
        repo.expect_list_by_user()
            .times(1)
            .returning(|_| Err(DomainError::StoreUnavailable("offline".to_string())));

        let snapshot = queries(repo).get_snapshot("u1").await;

        assert!(snapshot.weekly_trend.is_empty());
        assert!(snapshot.summary.is_none());
        assert_eq!(snapshot.heatmap.total, 0);
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let mut repo = MockCheckIns::new();
        repo.expect_list_by_user().returning(|user_id| {
            let at = |day: u32| Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
            Ok(vec![
                RawCheckIn {
                    user_id: user_id.clone(),
                    timestamp_millis: Some(at(13).timestamp_millis()),
                    mood_rating: Some(5),
                    mood_label: Some("Very Good".to_string()),
                    description: None,
                },
                RawCheckIn {
                    user_id: user_id.clone(),
                    timestamp_millis: None,
                    mood_rating: Some(1),
                    mood_label: None,
                    description: None,
                },
                RawCheckIn {
                    user_id: user_id.clone(),
                    timestamp_millis: Some(at(14).timestamp_millis()),
                    mood_rating: Some(4),
                    mood_label: Some("Good".to_string()),
                    description: None,
                },
            ])
        });

        let snapshot = queries(repo).get_snapshot("u1").await;

        let summary = snapshot.summary.expect("summary");
        assert_eq!(summary.total_check_ins, 2);
        assert_eq!(snapshot.heatmap.total, 2);
        assert_eq!(snapshot.longest_positive_run, 2);
    }
}
