use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::check_in::{CheckInRecord, DateKey, DayClock};

/// Streak as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_active_date: Option<DateKey>,
    pub broken: bool,
    /// Only true for the computation that consumed a restore override.
    pub restored: bool,
}

impl StreakState {
    pub fn empty() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_active_date: None,
            broken: false,
            restored: false,
        }
    }
}

/// Output of the live rule before any persisted progress is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveStreak {
    pub state: StreakState,
    /// Length of the consecutive run ending at the last check-in date,
    /// whether or not that run is still alive.
    pub pre_break_streak: u32,
}

/// Derives streaks from the check-in log.
///
/// All DateKeys come from one [`DayClock`], so "today" and every check-in
/// day agree on the zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakTracker {
    day_clock: DayClock,
}

impl StreakTracker {
    pub fn new(day_clock: DayClock) -> Self {
        Self { day_clock }
    }

    pub fn day_clock(&self) -> &DayClock {
        &self.day_clock
    }

    pub fn compute(&self, records: &[CheckInRecord], now: DateTime<Utc>) -> StreakState {
        self.evaluate(records, now).state
    }

    pub fn evaluate(&self, records: &[CheckInRecord], now: DateTime<Utc>) -> LiveStreak {
        let today = self.day_clock.date_key(now);
        let days = self.distinct_days(records, today);
        evaluate_days(&days, today)
    }

    /// Sorted, de-duplicated DateKeys up to and including `today`.
    fn distinct_days(&self, records: &[CheckInRecord], today: DateKey) -> Vec<DateKey> {
        let mut days: Vec<DateKey> = records
            .iter()
            .filter_map(|r| self.day_clock.date_key_from_millis(r.timestamp_millis()))
            .collect();

        let before = days.len();
        days.retain(|day| *day <= today);
        if days.len() < before {
            info!(
                "[streak] ignoring future-dated check-ins count={} today={}",
                before - days.len(),
                today
            );
        }

        days.sort_unstable();
        days.dedup();
        days
    }
}

/// Live rule over sorted, distinct days that are all `<= today`.
pub fn evaluate_days(days: &[DateKey], today: DateKey) -> LiveStreak {
    let Some(&last) = days.last() else {
        return LiveStreak {
            state: StreakState::empty(),
            pre_break_streak: 0,
        };
    };

    let trailing = trailing_run(days);
    let alive = today.days_since(last) <= 1;

    LiveStreak {
        state: StreakState {
            current_streak: if alive { trailing } else { 0 },
            longest_streak: longest_run(days),
            last_active_date: Some(last),
            broken: !alive,
            restored: false,
        },
        pre_break_streak: trailing,
    }
}

fn trailing_run(days: &[DateKey]) -> u32 {
    let mut run = 0;
    let mut expected: Option<DateKey> = None;
    for day in days.iter().rev() {
        match expected {
            Some(e) if e != *day => break,
            _ => {
                run += 1;
                expected = Some(day.pred());
            }
        }
    }
    run
}

fn longest_run(days: &[DateKey]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<DateKey> = None;
    for day in days {
        run = match previous {
            Some(p) if p.succ() == *day => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*day);
    }
    longest
}
