use log::info;
use serde::{Deserialize, Serialize};

use super::{LiveStreak, StreakState};
use crate::check_in::DateKey;
use crate::shared::{DomainError, UserId};

/// One-shot correction armed by a streak restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakOverride {
    pub current_streak: u32,
    /// Last check-in date the restored streak is anchored to.
    pub anchor: DateKey,
}

/// Persisted streak bookkeeping: the longest-streak watermark and the restore
/// protocol state. Everything else is recomputed from check-ins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakProgress {
    user_id: UserId,
    highest_streak: u32,
    restored_for: Option<DateKey>,
    pending_override: Option<StreakOverride>,
}

impl StreakProgress {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            highest_streak: 0,
            restored_for: None,
            pending_override: None,
        }
    }

    pub fn restore(
        user_id: UserId,
        highest_streak: u32,
        restored_for: Option<DateKey>,
        pending_override: Option<StreakOverride>,
    ) -> Self {
        Self {
            user_id,
            highest_streak,
            restored_for,
            pending_override,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn highest_streak(&self) -> u32 {
        self.highest_streak
    }

    pub fn restored_for(&self) -> Option<DateKey> {
        self.restored_for
    }

    pub fn pending_override(&self) -> Option<StreakOverride> {
        self.pending_override
    }

    fn raise_watermark(&mut self, live: &LiveStreak) {
        self.highest_streak = self
            .highest_streak
            .max(live.state.longest_streak)
            .max(live.state.current_streak);
    }

    /// Combine the live rule with persisted progress.
    ///
    /// Raises the watermark and consumes a pending override. An override only
    /// applies while the live streak is still broken; a fresh check-in since
    /// the restore makes live data authoritative again.
    pub fn resolve(&mut self, live: LiveStreak) -> StreakState {
        self.raise_watermark(&live);

        if let Some(pending) = self.pending_override.take() {
            if live.state.broken {
                info!(
                    "[streak] consuming restore override user_id={} current_streak={} anchor={}",
                    self.user_id, pending.current_streak, pending.anchor
                );
                return StreakState {
                    current_streak: pending.current_streak,
                    longest_streak: self.highest_streak.max(pending.current_streak),
                    last_active_date: Some(pending.anchor),
                    broken: false,
                    restored: true,
                };
            }
            info!(
                "[streak] discarding restore override, streak is live again user_id={}",
                self.user_id
            );
        }

        StreakState {
            longest_streak: self.highest_streak,
            ..live.state
        }
    }

    /// Arm a restore for the current break.
    ///
    /// Restores to the watermark, falling back to the run that just broke and
    /// finally to 1. Each break (identified by its last check-in date) can be
    /// restored once.
    pub fn grant_restore(&mut self, live: &LiveStreak) -> Result<StreakOverride, DomainError> {
        if !live.state.broken {
            return Err(DomainError::InvalidTransition(
                "Streak is not broken".to_string(),
            ));
        }
        let anchor = live.state.last_active_date.ok_or_else(|| {
            DomainError::InvalidTransition("No check-ins to restore a streak from".to_string())
        })?;
        if self.restored_for == Some(anchor) {
            return Err(DomainError::InvalidTransition(format!(
                "Streak already restored for the break after {}",
                anchor
            )));
        }

        self.raise_watermark(live);

        let current_streak = if self.highest_streak > 0 {
            self.highest_streak
        } else if live.pre_break_streak > 0 {
            live.pre_break_streak
        } else {
            1
        };

        let grant = StreakOverride {
            current_streak,
            anchor,
        };
        self.pending_override = Some(grant);
        self.restored_for = Some(anchor);
        Ok(grant)
    }
}
