pub mod check_in_repo;
pub mod daily_task_repo;
pub mod ledger_repo;
pub mod streak_repo;

pub use check_in_repo::SqliteCheckInRepository;
pub use daily_task_repo::SqliteDailyTaskRepository;
pub use ledger_repo::SqliteLedgerRepository;
pub use streak_repo::SqliteStreakProgressRepository;
