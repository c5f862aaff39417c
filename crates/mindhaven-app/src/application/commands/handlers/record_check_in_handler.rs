use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::check_in_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::dtos::CheckInDto;
use mindhaven_domain::check_in::{CheckInRecord, CheckInRepository};
use mindhaven_domain::shared::{Clock, DomainError, UserId};

pub struct RecordCheckInCommandHandler {
    check_in_repo: Arc<dyn CheckInRepository>,
    clock: Arc<dyn Clock>,
}

impl RecordCheckInCommandHandler {
    pub fn new(check_in_repo: Arc<dyn CheckInRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            check_in_repo,
            clock,
        }
    }
}

#[async_trait]
impl CommandHandler<RecordCheckInCommand> for RecordCheckInCommandHandler {
    type Result = RecordCheckInResult;

    async fn handle(&self, cmd: RecordCheckInCommand) -> Result<Self::Result, DomainError> {
        let record = CheckInRecord::new(
            UserId::from_string(&cmd.user_id),
            cmd.timestamp_millis
                .unwrap_or_else(|| self.clock.now().timestamp_millis()),
            cmd.mood_rating,
            cmd.mood_label.as_deref(),
            cmd.description,
        )?;

        self.check_in_repo.append(&record).await?;

        info!(
            "[check_in] recorded user_id={} rating={} mood={}",
            record.user_id(),
            record.mood_rating(),
            record.mood()
        );

        Ok(CheckInDto::from(&record))
    }
}
