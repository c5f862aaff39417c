// Domain layer - engagement rules and analytics over a user's check-in log
// No dependencies on infrastructure or presentation layers

pub mod analytics;
pub mod check_in;
pub mod daily_task;
pub mod ledger;
pub mod shared;
pub mod streak;

// Re-exports for convenience
pub use shared::{Clock, DomainError, UserId};
