mod date_key;
mod record;
mod repository;

pub use date_key::{DateKey, DayClock};
pub use record::{sanitize, CheckInRecord, MoodCategory, RawCheckIn};
pub use repository::CheckInRepository;
