use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::streak_commands::*;
use crate::application::dtos::StreakRestoreDto;
use crate::application::services::StreakService;
use mindhaven_domain::shared::{DomainError, UserId};

pub struct RestoreStreakCommandHandler {
    streak_service: Arc<StreakService>,
}

impl RestoreStreakCommandHandler {
    pub fn new(streak_service: Arc<StreakService>) -> Self {
        Self { streak_service }
    }
}

#[async_trait]
impl CommandHandler<RestoreStreakCommand> for RestoreStreakCommandHandler {
    type Result = RestoreStreakResult;

    async fn handle(&self, cmd: RestoreStreakCommand) -> Result<Self::Result, DomainError> {
        info!("Handling RestoreStreakCommand for user: {}", cmd.user_id);

        let user_id = UserId::from_string(&cmd.user_id);
        let grant = self.streak_service.restore(&user_id).await?;

        Ok(StreakRestoreDto::from_override(&cmd.user_id, &grant))
    }
}
