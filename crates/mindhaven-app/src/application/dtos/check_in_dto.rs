use serde::{Deserialize, Serialize};

use mindhaven_domain::check_in::CheckInRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInDto {
    pub user_id: String,
    pub timestamp_millis: i64,
    pub mood_rating: u8,
    pub mood_label: String,
    pub description: Option<String>,
}

impl From<&CheckInRecord> for CheckInDto {
    fn from(record: &CheckInRecord) -> Self {
        Self {
            user_id: record.user_id().to_string(),
            timestamp_millis: record.timestamp_millis(),
            mood_rating: record.mood_rating(),
            mood_label: record.mood().label().to_string(),
            description: record.description().map(str::to_string),
        }
    }
}
