use serde::{Deserialize, Serialize};

use crate::check_in::{CheckInRecord, DateKey, DayClock, MoodCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Stable,
    NeedsAttention,
}

impl Outlook {
    pub fn from_average(average_rating: f64) -> Self {
        if average_rating >= 3.0 {
            Outlook::Stable
        } else {
            Outlook::NeedsAttention
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub total_check_ins: usize,
    /// Mean mood rating, out of 5.
    pub average_rating: f64,
    pub dominant_mood: MoodCategory,
    pub last_check_in: DateKey,
    pub outlook: Outlook,
    pub recommendations: Vec<String>,
}

/// `records` must be in chronological order. `None` without check-ins.
pub fn profile_summary(records: &[CheckInRecord], day_clock: &DayClock) -> Option<ProfileSummary> {
    let last = records.last()?;
    let last_check_in = day_clock.date_key_from_millis(last.timestamp_millis())?;

    let total: u32 = records.iter().map(|r| u32::from(r.mood_rating())).sum();
    let average_rating = f64::from(total) / records.len() as f64;
    let dominant_mood = dominant_mood(records)?;

    Some(ProfileSummary {
        total_check_ins: records.len(),
        average_rating,
        dominant_mood,
        last_check_in,
        outlook: Outlook::from_average(average_rating),
        recommendations: recommendations(average_rating, dominant_mood),
    })
}

/// Most frequent category; ties go to the category seen first.
fn dominant_mood(records: &[CheckInRecord]) -> Option<MoodCategory> {
    let mut counts: Vec<(MoodCategory, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(mood, _)| *mood == record.mood()) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.mood(), 1)),
        }
    }

    let mut best: Option<(MoodCategory, usize)> = None;
    for (mood, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood)
}

pub fn recommendations(average_rating: f64, dominant_mood: MoodCategory) -> Vec<String> {
    let base: &[&str] = if average_rating >= 4.0 {
        &[
            "Continue your current self-care routine",
            "Share your wellness strategies with others",
            "Try new mindfulness techniques to maintain balance",
            "Consider setting new wellness goals",
        ]
    } else if average_rating >= 3.0 {
        &[
            "Establish a regular sleep schedule",
            "Try 10 minutes of daily meditation",
            "Engage in moderate exercise 3 times a week",
            "Practice gratitude journaling",
        ]
    } else {
        &[
            "Consider speaking with a mental health professional",
            "Start with small daily self-care activities",
            "Practice deep breathing exercises",
            "Connect with supportive friends or family",
            "Try gentle activities like walking or listening to music",
        ]
    };

    let extra: &[&str] = if dominant_mood.is_low() {
        &[
            "Consider professional counseling support",
            "Engage in activities that bring you joy",
        ]
    } else if dominant_mood.is_high() {
        &[
            "Maintain your positive habits",
            "Help others to boost your own well-being",
        ]
    } else {
        &[]
    };

    base.iter().chain(extra).map(|s| s.to_string()).collect()
}
