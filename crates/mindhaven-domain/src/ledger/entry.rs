use serde::{Deserialize, Serialize};

use crate::shared::UserId;

/// Point delta for marking a daily task done. Un-marking applies the negation.
pub const TASK_COMPLETION_POINTS: i64 = 100;

/// Generic engagement reward, e.g. finishing a guided breathing exercise.
pub const ENGAGEMENT_REWARD_POINTS: i64 = 10;

/// A user's point balance. Only ever moved by explicit signed deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessLedgerEntry {
    user_id: UserId,
    display_name: Option<String>,
    points: i64,
    visible_on_leaderboard: bool,
}

impl WellnessLedgerEntry {
    /// Zero baseline, visible on the leaderboard.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            display_name: None,
            points: 0,
            visible_on_leaderboard: true,
        }
    }

    pub fn restore(
        user_id: UserId,
        display_name: Option<String>,
        points: i64,
        visible_on_leaderboard: bool,
    ) -> Self {
        Self {
            user_id,
            display_name,
            points,
            visible_on_leaderboard,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        let name = display_name.into();
        self.display_name = if name.trim().is_empty() { None } else { Some(name) };
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn is_visible_on_leaderboard(&self) -> bool {
        self.visible_on_leaderboard
    }

    /// Name shown on the leaderboard: display name, then user id, then "Anonymous".
    pub fn presentation_name(&self) -> String {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or_else(|| Some(self.user_id.as_str()).filter(|id| !id.trim().is_empty()))
            .unwrap_or("Anonymous")
            .to_string()
    }

    /// Apply a signed delta. Points are not clamped at zero so that every
    /// delta can be reversed exactly.
    pub fn apply_delta(mut self, delta: i64) -> Self {
        self.points = self.points.saturating_add(delta);
        self
    }

    pub fn set_visible_on_leaderboard(&mut self, visible: bool) {
        self.visible_on_leaderboard = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_starts_at_zero_and_visible() {
        let entry = WellnessLedgerEntry::new(UserId::from_string("u1"));
        assert_eq!(entry.points(), 0);
        assert!(entry.is_visible_on_leaderboard());
    }

    #[test]
    fn test_completion_delta_is_symmetric() {
        let entry = WellnessLedgerEntry::restore(UserId::from_string("u1"), None, 40, true);

        let round_trip = entry
            .clone()
            .apply_delta(TASK_COMPLETION_POINTS)
            .apply_delta(-TASK_COMPLETION_POINTS);

        assert_eq!(round_trip, entry);
    }

    #[test]
    fn test_points_may_go_negative() {
        let entry = WellnessLedgerEntry::new(UserId::from_string("u1")).apply_delta(-100);
        assert_eq!(entry.points(), -100);
    }

    #[test]
    fn test_presentation_name_fallbacks() {
        let named = WellnessLedgerEntry::new(UserId::from_string("u1")).with_display_name("Ada");
        let unnamed = WellnessLedgerEntry::new(UserId::from_string("u2")).with_display_name("  ");
        let anonymous = WellnessLedgerEntry::new(UserId::from_string(""));

        assert_eq!(named.presentation_name(), "Ada");
        assert_eq!(unnamed.presentation_name(), "u2");
        assert_eq!(anonymous.presentation_name(), "Anonymous");
    }
}
