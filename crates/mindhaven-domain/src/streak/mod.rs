mod progress;
mod repository;
mod tracker;

#[cfg(test)]
mod progress_test;

pub use progress::{StreakOverride, StreakProgress};
pub use repository::StreakProgressRepository;
pub use tracker::{evaluate_days, LiveStreak, StreakState, StreakTracker};
