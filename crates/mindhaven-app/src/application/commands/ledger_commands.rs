use serde::{Deserialize, Serialize};

use crate::application::commands::command_handler::Command;
use crate::application::dtos::WellnessLedgerDto;

// ============================================================
// Award Engagement Points Command
// ============================================================

/// Small fixed reward for engagement outside daily tasks (e.g. a check-in).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardEngagementPointsCommand {
    pub user_id: String,
}

impl Command for AwardEngagementPointsCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardEngagementPointsResult {
    pub points_awarded: i64,
    pub balance: i64,
}

// ============================================================
// Set Leaderboard Visibility Command
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLeaderboardVisibilityCommand {
    pub user_id: String,
    pub visible: bool,
}

impl Command for SetLeaderboardVisibilityCommand {}

pub type SetLeaderboardVisibilityResult = WellnessLedgerDto;

// ============================================================
// Register Ledger Command
// ============================================================

/// Create the user's ledger at a zero balance, keeping an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterLedgerCommand {
    pub user_id: String,
    pub display_name: Option<String>,
}

impl Command for RegisterLedgerCommand {}

pub type RegisterLedgerResult = WellnessLedgerDto;
