use serde::{Deserialize, Serialize};

use super::WellnessLedgerEntry;
use crate::shared::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based
    pub rank: usize,
    pub user_id: UserId,
    pub name: String,
    pub points: i64,
}

/// Rank visible entries by points, highest first.
///
/// The sort is stable, so ties keep the order the entries were given in
/// (document order from the store). Hidden users keep their points but are
/// left out of the ranking.
pub fn rank(entries: &[WellnessLedgerEntry]) -> Vec<RankedEntry> {
    let mut visible: Vec<&WellnessLedgerEntry> = entries
        .iter()
        .filter(|e| e.is_visible_on_leaderboard())
        .collect();
    visible.sort_by(|a, b| b.points().cmp(&a.points()));

    visible
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RankedEntry {
            rank: i + 1,
            user_id: entry.user_id().clone(),
            name: entry.presentation_name(),
            points: entry.points(),
        })
        .collect()
}

/// The user's 1-based position in the visible ranking, if listed.
pub fn position_of(ranked: &[RankedEntry], user_id: &UserId) -> Option<usize> {
    ranked
        .iter()
        .find(|entry| &entry.user_id == user_id)
        .map(|entry| entry.rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, points: i64, visible: bool) -> WellnessLedgerEntry {
        WellnessLedgerEntry::restore(UserId::from_string(id), None, points, visible)
    }

    #[test]
    fn test_rank_sorts_descending_with_stable_ties() {
        let entries = vec![
            entry("a", 100, true),
            entry("b", 300, true),
            entry("c", 100, true),
            entry("d", 200, true),
        ];

        let ranked = rank(&entries);
        let order: Vec<&str> = ranked.iter().map(|r| r.user_id.as_str()).collect();

        assert_eq!(order, vec!["b", "d", "a", "c"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[3].rank, 4);
    }

    #[test]
    fn test_hidden_users_excluded() {
        let entries = vec![entry("a", 500, false), entry("b", 10, true)];

        let ranked = rank(&entries);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].user_id.as_str(), "b");
        assert_eq!(position_of(&ranked, &UserId::from_string("a")), None);
        assert_eq!(position_of(&ranked, &UserId::from_string("b")), Some(1));
    }
}
