use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::check_in::DateKey;

/// Days covered by the heatmap, ending today.
pub const HEATMAP_WINDOW_DAYS: i64 = 365;

/// Check-ins per day at which a cell reaches full intensity.
pub const HEATMAP_SATURATION: u32 = 3;

/// Columns per month-label sample.
const WEEKS_PER_LABEL: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: DateKey,
    pub count: u32,
    /// `min(count / 3, 1)`
    pub intensity: f64,
    /// Outside the window (before its start or after today); kept for layout.
    pub muted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabel {
    pub column: usize,
    pub label: String,
}

/// Rolling-year calendar grid: 7 weekday rows (Sunday first) by week columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub window_start: DateKey,
    pub window_end: DateKey,
    pub rows: Vec<Vec<HeatmapCell>>,
    pub month_labels: Vec<MonthLabel>,
    /// Check-ins inside the window; equals the sum of all cell counts.
    pub total: u32,
}

impl Heatmap {
    pub fn columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn cell(&self, date: DateKey) -> Option<&HeatmapCell> {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .find(|cell| cell.date == date)
    }
}

fn intensity(count: u32) -> f64 {
    (f64::from(count) / f64::from(HEATMAP_SATURATION)).min(1.0)
}

/// Build the grid from one DateKey per check-in (duplicates mean several
/// check-ins that day).
pub fn build_heatmap(check_in_days: &[DateKey], today: DateKey) -> Heatmap {
    let window_start = today.minus_days(HEATMAP_WINDOW_DAYS - 1);

    let mut counts: HashMap<DateKey, u32> = HashMap::new();
    for day in check_in_days
        .iter()
        .filter(|d| **d >= window_start && **d <= today)
    {
        *counts.entry(*day).or_insert(0) += 1;
    }

    let lead = i64::from(window_start.date().weekday().num_days_from_sunday());
    let trail = 6 - i64::from(today.date().weekday().num_days_from_sunday());
    let grid_start = window_start.minus_days(lead);
    let grid_end = today.plus_days(trail);
    let columns = usize::try_from((grid_end.days_since(grid_start) + 1) / 7).unwrap_or(0);

    let mut rows: Vec<Vec<HeatmapCell>> = (0..7).map(|_| Vec::with_capacity(columns)).collect();
    for column in 0..columns {
        for (weekday, row) in rows.iter_mut().enumerate() {
            let offset = i64::try_from(column * 7 + weekday).unwrap_or(i64::MAX);
            let date = grid_start.plus_days(offset);
            let muted = date < window_start || date > today;
            let count = if muted {
                0
            } else {
                counts.get(&date).copied().unwrap_or(0)
            };
            row.push(HeatmapCell {
                date,
                count,
                intensity: intensity(count),
                muted,
            });
        }
    }

    let month_labels = (0..columns)
        .step_by(WEEKS_PER_LABEL)
        .map(|column| {
            let first_day = grid_start.plus_days(i64::try_from(column * 7).unwrap_or(0));
            MonthLabel {
                column,
                label: first_day.date().format("%b").to_string(),
            }
        })
        .collect();

    Heatmap {
        window_start,
        window_end: today,
        rows,
        month_labels,
        total: counts.values().sum(),
    }
}
