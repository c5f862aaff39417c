use log::info;
use std::sync::Arc;

use super::UserWriteLocks;
use mindhaven_domain::check_in::{sanitize, CheckInRepository};
use mindhaven_domain::shared::{Clock, DomainError, UserId};
use mindhaven_domain::streak::{
    LiveStreak, StreakOverride, StreakProgress, StreakProgressRepository, StreakState,
    StreakTracker,
};

/// Applies persisted streak progress on top of the live check-in rule.
///
/// Both operations mutate progress (watermark, restore override), so they run
/// under the per-user write lock.
pub struct StreakService {
    check_in_repo: Arc<dyn CheckInRepository>,
    progress_repo: Arc<dyn StreakProgressRepository>,
    tracker: StreakTracker,
    clock: Arc<dyn Clock>,
    locks: Arc<UserWriteLocks>,
}

impl StreakService {
    pub fn new(
        check_in_repo: Arc<dyn CheckInRepository>,
        progress_repo: Arc<dyn StreakProgressRepository>,
        tracker: StreakTracker,
        clock: Arc<dyn Clock>,
        locks: Arc<UserWriteLocks>,
    ) -> Self {
        Self {
            check_in_repo,
            progress_repo,
            tracker,
            clock,
            locks,
        }
    }

    async fn load(&self, user_id: &UserId) -> Result<(LiveStreak, StreakProgress), DomainError> {
        let records = sanitize(self.check_in_repo.list_by_user(user_id).await?);
        let live = self.tracker.evaluate(&records, self.clock.now());
        let progress = self
            .progress_repo
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| StreakProgress::new(user_id.clone()));
        Ok((live, progress))
    }

    pub async fn current_state(&self, user_id: &UserId) -> Result<StreakState, DomainError> {
        let _guard = self.locks.acquire(user_id).await;

        let (live, mut progress) = self.load(user_id).await?;
        let before = progress.clone();
        let state = progress.resolve(live);

        if progress != before {
            self.progress_repo.save(&progress).await?;
        }

        info!(
            "[streak] state user_id={} current={} longest={} broken={} restored={}",
            user_id, state.current_streak, state.longest_streak, state.broken, state.restored
        );
        Ok(state)
    }

    pub async fn restore(&self, user_id: &UserId) -> Result<StreakOverride, DomainError> {
        let _guard = self.locks.acquire(user_id).await;

        let (live, mut progress) = self.load(user_id).await?;
        let grant = progress.grant_restore(&live)?;
        self.progress_repo.save(&progress).await?;

        info!(
            "[streak] restore granted user_id={} current_streak={} anchor={}",
            user_id, grant.current_streak, grant.anchor
        );
        Ok(grant)
    }
}
