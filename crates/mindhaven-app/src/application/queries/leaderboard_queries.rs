use log::info;
use std::sync::Arc;

use crate::application::dtos::{LeaderboardEntryDto, LeaderboardPositionDto, WellnessLedgerDto};
use mindhaven_domain::ledger::{position_of, rank, LedgerRepository};
use mindhaven_domain::shared::{DomainError, UserId};

pub struct LeaderboardQueries {
    ledger_repo: Arc<dyn LedgerRepository>,
}

impl LeaderboardQueries {
    pub fn new(ledger_repo: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger_repo }
    }

    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntryDto>, DomainError> {
        let entries = self.ledger_repo.find_all().await?;
        let ranked: Vec<LeaderboardEntryDto> =
            rank(&entries).into_iter().map(Into::into).collect();

        info!(
            "[leaderboard] ranked={} ledgers={}",
            ranked.len(),
            entries.len()
        );
        Ok(ranked)
    }

    pub async fn get_leaderboard_position(
        &self,
        user_id: &str,
    ) -> Result<LeaderboardPositionDto, DomainError> {
        let entries = self.ledger_repo.find_all().await?;
        let ranked = rank(&entries);

        Ok(LeaderboardPositionDto {
            user_id: user_id.to_string(),
            position: position_of(&ranked, &UserId::from_string(user_id)),
            total_ranked: ranked.len(),
        })
    }

    /// A user without a ledger gets one at the zero baseline.
    pub async fn get_ledger(&self, user_id: &str) -> Result<WellnessLedgerDto, DomainError> {
        let entry = self
            .ledger_repo
            .create_if_absent(&UserId::from_string(user_id), None)
            .await?;
        Ok(WellnessLedgerDto::from(&entry))
    }
}
