use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::ledger_commands::*;
use crate::application::dtos::WellnessLedgerDto;
use mindhaven_domain::ledger::LedgerRepository;
use mindhaven_domain::shared::{DomainError, UserId};

// ============================================================
// Award Engagement Points
// ============================================================

pub struct AwardEngagementPointsCommandHandler {
    ledger_repo: Arc<dyn LedgerRepository>,
    reward_points: i64,
}

impl AwardEngagementPointsCommandHandler {
    pub fn new(ledger_repo: Arc<dyn LedgerRepository>, reward_points: i64) -> Self {
        Self {
            ledger_repo,
            reward_points,
        }
    }
}

#[async_trait]
impl CommandHandler<AwardEngagementPointsCommand> for AwardEngagementPointsCommandHandler {
    type Result = AwardEngagementPointsResult;

    async fn handle(
        &self,
        cmd: AwardEngagementPointsCommand,
    ) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        let balance = self
            .ledger_repo
            .increment_points(&user_id, self.reward_points)
            .await?;

        info!(
            "[ledger] engagement reward user_id={} points={} balance={}",
            user_id, self.reward_points, balance
        );

        Ok(AwardEngagementPointsResult {
            points_awarded: self.reward_points,
            balance,
        })
    }
}

// ============================================================
// Set Leaderboard Visibility
// ============================================================

pub struct SetLeaderboardVisibilityCommandHandler {
    ledger_repo: Arc<dyn LedgerRepository>,
}

impl SetLeaderboardVisibilityCommandHandler {
    pub fn new(ledger_repo: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger_repo }
    }
}

#[async_trait]
impl CommandHandler<SetLeaderboardVisibilityCommand> for SetLeaderboardVisibilityCommandHandler {
    type Result = SetLeaderboardVisibilityResult;

    async fn handle(
        &self,
        cmd: SetLeaderboardVisibilityCommand,
    ) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        let entry = self.ledger_repo.set_visibility(&user_id, cmd.visible).await?;

        info!(
            "[ledger] leaderboard visibility user_id={} visible={}",
            user_id, cmd.visible
        );

        Ok(WellnessLedgerDto::from(&entry))
    }
}

// ============================================================
// Register Ledger
// ============================================================

pub struct RegisterLedgerCommandHandler {
    ledger_repo: Arc<dyn LedgerRepository>,
}

impl RegisterLedgerCommandHandler {
    pub fn new(ledger_repo: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger_repo }
    }
}

#[async_trait]
impl CommandHandler<RegisterLedgerCommand> for RegisterLedgerCommandHandler {
    type Result = RegisterLedgerResult;

    async fn handle(&self, cmd: RegisterLedgerCommand) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        let display_name = cmd
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let entry = self
            .ledger_repo
            .create_if_absent(&user_id, display_name)
            .await?;

        info!(
            "[ledger] ledger ready user_id={} points={}",
            user_id,
            entry.points()
        );

        Ok(WellnessLedgerDto::from(&entry))
    }
}
