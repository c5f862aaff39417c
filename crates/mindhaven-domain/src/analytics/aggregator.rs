use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{build_heatmap, profile_summary, Heatmap, ProfileSummary};
use crate::check_in::{CheckInRecord, DayClock, MoodCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMood {
    /// ISO week, e.g. `2024-W01`
    pub week: String,
    pub average_rating: f64,
    pub check_ins: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: MoodCategory,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub weekly_trend: Vec<WeeklyMood>,
    pub distribution: Vec<MoodCount>,
    pub heatmap: Heatmap,
    pub longest_positive_run: usize,
    pub summary: Option<ProfileSummary>,
}

/// Pure derivations over a user's check-in log.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsAggregator {
    day_clock: DayClock,
}

impl AnalyticsAggregator {
    pub fn new(day_clock: DayClock) -> Self {
        Self { day_clock }
    }

    pub fn snapshot(&self, records: &[CheckInRecord], now: DateTime<Utc>) -> AnalyticsSnapshot {
        let mut ordered: Vec<CheckInRecord> = records.to_vec();
        ordered.sort_by_key(CheckInRecord::timestamp_millis);

        let today = self.day_clock.date_key(now);
        let days: Vec<_> = ordered
            .iter()
            .filter_map(|r| self.day_clock.date_key_from_millis(r.timestamp_millis()))
            .collect();

        AnalyticsSnapshot {
            weekly_trend: self.weekly_trend(&ordered),
            distribution: mood_distribution(&ordered),
            heatmap: build_heatmap(&days, today),
            longest_positive_run: longest_positive_run(&ordered),
            summary: profile_summary(&ordered, &self.day_clock),
        }
    }

    /// Snapshot of a user with no usable check-ins.
    pub fn empty_snapshot(&self, now: DateTime<Utc>) -> AnalyticsSnapshot {
        self.snapshot(&[], now)
    }

    /// Average rating per ISO week, ascending. Empty weeks are omitted.
    pub fn weekly_trend(&self, records: &[CheckInRecord]) -> Vec<WeeklyMood> {
        let mut weeks: BTreeMap<(i32, u32), (u32, usize)> = BTreeMap::new();
        for record in records {
            let Some(day) = self.day_clock.date_key_from_millis(record.timestamp_millis()) else {
                continue;
            };
            let iso = day.date().iso_week();
            let entry = weeks.entry((iso.year(), iso.week())).or_insert((0, 0));
            entry.0 += u32::from(record.mood_rating());
            entry.1 += 1;
        }

        weeks
            .into_iter()
            .map(|((year, week), (sum, count))| WeeklyMood {
                week: format!("{}-W{:02}", year, week),
                average_rating: f64::from(sum) / count as f64,
                check_ins: count,
            })
            .collect()
    }
}

/// Count per category, all five categories present.
pub fn mood_distribution(records: &[CheckInRecord]) -> Vec<MoodCount> {
    MoodCategory::ALL
        .iter()
        .map(|mood| MoodCount {
            mood: *mood,
            count: records.iter().filter(|r| r.mood() == *mood).count(),
        })
        .collect()
}

/// Longest run of consecutive records (in the given order) rated 4 or more.
pub fn longest_positive_run(records: &[CheckInRecord]) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for record in records {
        if record.is_positive() {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::UserId;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, rating: u8) -> CheckInRecord {
        let ts = Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap().timestamp_millis();
        CheckInRecord::new(UserId::from_string("u1"), ts, rating, None, None).unwrap()
    }

    #[test]
    fn test_weekly_trend_groups_by_iso_week() {
        let aggregator = AnalyticsAggregator::default();
        let records = vec![
            at(2024, 1, 1, 2), // Monday, 2024-W01
            at(2024, 1, 7, 4), // Sunday, still 2024-W01
            at(2024, 1, 22, 5),
        ];

        let trend = aggregator.weekly_trend(&records);

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].week, "2024-W01");
        assert!((trend[0].average_rating - 3.0).abs() < 1e-9);
        assert_eq!(trend[1].week, "2024-W04");
        assert_eq!(trend[1].check_ins, 1);
    }

    #[test]
    fn test_weekly_trend_orders_across_year_boundary() {
        let aggregator = AnalyticsAggregator::default();
        // 2024-12-30 belongs to 2025-W01
        let records = vec![at(2024, 12, 30, 3), at(2024, 12, 20, 1)];

        let weeks: Vec<String> = aggregator
            .weekly_trend(&records)
            .into_iter()
            .map(|w| w.week)
            .collect();

        assert_eq!(weeks, vec!["2024-W51", "2025-W01"]);
    }

    #[test]
    fn test_distribution_lists_every_category() {
        let records = vec![at(2024, 1, 1, 5), at(2024, 1, 2, 5), at(2024, 1, 3, 1)];

        let distribution = mood_distribution(&records);

        assert_eq!(distribution.len(), 5);
        assert_eq!(distribution[0], MoodCount { mood: MoodCategory::VeryPoor, count: 1 });
        assert_eq!(distribution[2].count, 0);
        assert_eq!(distribution[4].count, 2);
    }

    #[test]
    fn test_longest_positive_run_follows_record_order() {
        let ratings = [4, 5, 2, 4, 4, 5, 3, 5];
        let records: Vec<_> = ratings
            .iter()
            .enumerate()
            .map(|(i, r)| at(2024, 1, i as u32 + 1, *r))
            .collect();

        assert_eq!(longest_positive_run(&records), 3);
        assert_eq!(longest_positive_run(&[]), 0);
    }

    #[test]
    fn test_snapshot_sorts_records_chronologically() {
        let aggregator = AnalyticsAggregator::default();
        let records = vec![at(2024, 1, 3, 5), at(2024, 1, 1, 4), at(2024, 1, 2, 1)];
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 18, 0, 0).unwrap();

        let snapshot = aggregator.snapshot(&records, now);

        // chronological: 4, 1, 5
        assert_eq!(snapshot.longest_positive_run, 1);
        assert_eq!(snapshot.heatmap.total, 3);
        let summary = snapshot.summary.unwrap();
        assert_eq!(summary.last_check_in.to_string(), "2024-01-03");
        assert_eq!(summary.dominant_mood, MoodCategory::Good);
    }

    #[test]
    fn test_empty_snapshot_is_zeroed() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 18, 0, 0).unwrap();
        let snapshot = AnalyticsAggregator::default().empty_snapshot(now);

        assert!(snapshot.weekly_trend.is_empty());
        assert!(snapshot.distribution.iter().all(|m| m.count == 0));
        assert_eq!(snapshot.heatmap.total, 0);
        assert_eq!(snapshot.longest_positive_run, 0);
        assert!(snapshot.summary.is_none());
    }
}
