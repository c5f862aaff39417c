mod ledger_handlers;
mod record_check_in_handler;
mod restore_streak_handler;
mod task_handlers;


pub use ledger_handlers::{
    AwardEngagementPointsCommandHandler, RegisterLedgerCommandHandler,
    SetLeaderboardVisibilityCommandHandler,
};
pub use record_check_in_handler::RecordCheckInCommandHandler;
pub use restore_streak_handler::RestoreStreakCommandHandler;
pub use task_handlers::TaskCommandHandler;
