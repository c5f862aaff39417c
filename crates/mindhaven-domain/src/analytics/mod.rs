mod aggregator;
mod heatmap;
mod summary;

pub use aggregator::{
    longest_positive_run, mood_distribution, AnalyticsAggregator, AnalyticsSnapshot, MoodCount,
    WeeklyMood,
};
pub use heatmap::{
    build_heatmap, Heatmap, HeatmapCell, MonthLabel, HEATMAP_SATURATION, HEATMAP_WINDOW_DAYS,
};
pub use summary::{profile_summary, recommendations, Outlook, ProfileSummary};
