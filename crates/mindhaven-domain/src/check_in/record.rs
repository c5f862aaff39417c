use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::{DomainError, UserId};

/// The five fixed mood categories, ordered from lowest to highest rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoodCategory {
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Poor,
    Neutral,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 5] = [
        MoodCategory::VeryPoor,
        MoodCategory::Poor,
        MoodCategory::Neutral,
        MoodCategory::Good,
        MoodCategory::VeryGood,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::VeryPoor => "Very Poor",
            MoodCategory::Poor => "Poor",
            MoodCategory::Neutral => "Neutral",
            MoodCategory::Good => "Good",
            MoodCategory::VeryGood => "Very Good",
        }
    }

    /// Category a 1..=5 rating corresponds to
    pub fn from_rating(rating: u8) -> Option<Self> {
        match rating {
            1 => Some(MoodCategory::VeryPoor),
            2 => Some(MoodCategory::Poor),
            3 => Some(MoodCategory::Neutral),
            4 => Some(MoodCategory::Good),
            5 => Some(MoodCategory::VeryGood),
            _ => None,
        }
    }

    /// Case-insensitive label lookup, tolerant of `_`/`-` separators
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect();

        match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "very poor" => Some(MoodCategory::VeryPoor),
            "poor" => Some(MoodCategory::Poor),
            "neutral" => Some(MoodCategory::Neutral),
            "good" => Some(MoodCategory::Good),
            "very good" => Some(MoodCategory::VeryGood),
            _ => None,
        }
    }

    pub fn is_low(&self) -> bool {
        matches!(self, MoodCategory::VeryPoor | MoodCategory::Poor)
    }

    pub fn is_high(&self) -> bool {
        matches!(self, MoodCategory::Good | MoodCategory::VeryGood)
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A check-in document exactly as the store holds it.
///
/// Documents written by older clients can lack fields, so everything beyond the
/// owner is optional until [`CheckInRecord::from_raw`] validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCheckIn {
    pub user_id: UserId,
    pub timestamp_millis: Option<i64>,
    pub mood_rating: Option<i64>,
    pub mood_label: Option<String>,
    pub description: Option<String>,
}

/// Validated, immutable check-in event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRecord {
    user_id: UserId,
    timestamp_millis: i64,
    mood_rating: u8,
    mood: MoodCategory,
    description: Option<String>,
}

impl CheckInRecord {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;

    /// Validate a new check-in submission.
    ///
    /// When `mood_label` is absent the category implied by the rating is used.
    pub fn new(
        user_id: UserId,
        timestamp_millis: i64,
        mood_rating: u8,
        mood_label: Option<&str>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        let rating_mood = MoodCategory::from_rating(mood_rating).ok_or_else(|| {
            DomainError::Validation(format!(
                "Mood rating must be between {} and {}, got {}",
                Self::MIN_RATING,
                Self::MAX_RATING,
                mood_rating
            ))
        })?;

        let mood = match mood_label {
            Some(label) => MoodCategory::from_label(label).ok_or_else(|| {
                DomainError::Validation(format!("Unknown mood label: {}", label))
            })?,
            None => rating_mood,
        };

        Ok(Self {
            user_id,
            timestamp_millis,
            mood_rating,
            mood,
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }

    /// Turn a stored document into a record, rejecting missing timestamp/rating.
    ///
    /// Unknown labels are not fatal: the category falls back to the rating.
    pub fn from_raw(raw: RawCheckIn) -> Result<Self, DomainError> {
        let timestamp_millis = raw.timestamp_millis.ok_or_else(|| {
            DomainError::Validation("Check-in is missing its timestamp".to_string())
        })?;
        let rating = raw.mood_rating.ok_or_else(|| {
            DomainError::Validation("Check-in is missing its mood rating".to_string())
        })?;
        let mood_rating = u8::try_from(rating)
            .ok()
            .filter(|r| (Self::MIN_RATING..=Self::MAX_RATING).contains(r))
            .ok_or_else(|| {
                DomainError::Validation(format!("Mood rating out of range: {}", rating))
            })?;

        let rating_mood = MoodCategory::from_rating(mood_rating).ok_or_else(|| {
            DomainError::Validation(format!("Mood rating out of range: {}", rating))
        })?;

        let mood = match raw.mood_label.as_deref() {
            Some(label) => MoodCategory::from_label(label).unwrap_or_else(|| {
                warn!(
                    "[check_in] unknown mood label user_id={} label={:?} fallback={}",
                    raw.user_id, label, rating_mood
                );
                rating_mood
            }),
            None => rating_mood,
        };

        Ok(Self {
            user_id: raw.user_id,
            timestamp_millis,
            mood_rating,
            mood,
            description: raw.description,
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    pub fn mood_rating(&self) -> u8 {
        self.mood_rating
    }

    pub fn mood(&self) -> MoodCategory {
        self.mood
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_positive(&self) -> bool {
        self.mood_rating >= 4
    }
}

/// Validate raw documents, dropping the malformed ones with a warning instead
/// of failing the whole batch.
pub fn sanitize(raws: Vec<RawCheckIn>) -> Vec<CheckInRecord> {
    let total = raws.len();
    let records: Vec<CheckInRecord> = raws
        .into_iter()
        .filter_map(|raw| {
            let user_id = raw.user_id.clone();
            match CheckInRecord::from_raw(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("[check_in] dropping malformed check-in user_id={} err={}", user_id, e);
                    None
                }
            }
        })
        .collect();

    if records.len() < total {
        warn!(
            "[check_in] sanitized check-ins kept={} dropped={}",
            records.len(),
            total - records.len()
        );
    }

    records
}
