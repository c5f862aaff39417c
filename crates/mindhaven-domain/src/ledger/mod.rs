mod entry;
mod ranking;
mod repository;

pub use entry::{WellnessLedgerEntry, ENGAGEMENT_REWARD_POINTS, TASK_COMPLETION_POINTS};
pub use ranking::{position_of, rank, RankedEntry};
pub use repository::LedgerRepository;
