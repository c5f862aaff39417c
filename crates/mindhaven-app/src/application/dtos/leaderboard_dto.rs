use serde::{Deserialize, Serialize};

use mindhaven_domain::ledger::{RankedEntry, WellnessLedgerEntry};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntryDto {
    pub rank: usize,
    pub user_id: String,
    pub name: String,
    pub points: i64,
}

impl From<RankedEntry> for LeaderboardEntryDto {
    fn from(entry: RankedEntry) -> Self {
        Self {
            rank: entry.rank,
            user_id: entry.user_id.to_string(),
            name: entry.name,
            points: entry.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardPositionDto {
    pub user_id: String,
    /// 1-based; `None` when hidden or without a ledger.
    pub position: Option<usize>,
    pub total_ranked: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessLedgerDto {
    pub user_id: String,
    pub display_name: Option<String>,
    pub points: i64,
    pub visible_on_leaderboard: bool,
}

impl From<&WellnessLedgerEntry> for WellnessLedgerDto {
    fn from(entry: &WellnessLedgerEntry) -> Self {
        Self {
            user_id: entry.user_id().to_string(),
            display_name: entry.display_name().map(str::to_string),
            points: entry.points(),
            visible_on_leaderboard: entry.is_visible_on_leaderboard(),
        }
    }
}
