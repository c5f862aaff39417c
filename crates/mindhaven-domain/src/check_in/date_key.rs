use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::DomainError;

/// Calendar day a check-in belongs to, in the user's zone (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        NaiveDate::parse_from_str(value, Self::FORMAT)
            .map(Self)
            .map_err(|e| DomainError::Validation(format!("Invalid date key {}: {}", value, e)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn succ(&self) -> Self {
        Self(self.0 + Duration::days(1))
    }

    pub fn pred(&self) -> Self {
        Self(self.0 - Duration::days(1))
    }

    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Signed number of calendar days from `earlier` to `self`
    pub fn days_since(&self, earlier: DateKey) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl TryFrom<String> for DateKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

/// Converts instants into DateKeys using one fixed zone for the whole session,
/// so a check-in at 23:59 and "today" never disagree about the day.
#[derive(Debug, Clone, Copy)]
pub struct DayClock {
    offset: FixedOffset,
}

impl DayClock {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn with_offset_minutes(minutes: i32) -> Result<Self, DomainError> {
        let offset = minutes.checked_mul(60).and_then(FixedOffset::east_opt).ok_or_else(|| {
            DomainError::Validation(format!("UTC offset out of range: {} minutes", minutes))
        })?;
        Ok(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn date_key(&self, instant: DateTime<Utc>) -> DateKey {
        DateKey(instant.with_timezone(&self.offset).date_naive())
    }

    /// `None` when the millisecond timestamp is outside chrono's range.
    pub fn date_key_from_millis(&self, timestamp_millis: i64) -> Option<DateKey> {
        self.offset
            .timestamp_millis_opt(timestamp_millis)
            .single()
            .map(|local| DateKey(local.date_naive()))
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_formats_as_iso_day() {
        let key = DateKey::parse("2024-01-05").unwrap();
        assert_eq!(key.to_string(), "2024-01-05");
        assert_eq!(key.pred().to_string(), "2024-01-04");
        assert_eq!(key.succ().to_string(), "2024-01-06");
    }

    #[test]
    fn test_date_key_rejects_garbage() {
        assert!(DateKey::parse("05/01/2024").is_err());
    }

    #[test]
    fn test_offset_moves_late_evening_to_next_day() {
        // 2024-01-01 23:30 UTC is already Jan 2 at UTC+05:30
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();

        let utc = DayClock::utc();
        let ist = DayClock::with_offset_minutes(330).unwrap();

        assert_eq!(utc.date_key(instant).to_string(), "2024-01-01");
        assert_eq!(ist.date_key(instant).to_string(), "2024-01-02");
        assert_eq!(
            ist.date_key_from_millis(instant.timestamp_millis()),
            Some(ist.date_key(instant))
        );
    }

    #[test]
    fn test_offset_out_of_range_rejected() {
        assert!(DayClock::with_offset_minutes(24 * 60).is_err());
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let key = DateKey::parse("2024-03-09").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-03-09\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
