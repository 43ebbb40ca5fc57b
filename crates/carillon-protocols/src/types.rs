//! Shared vocabulary used by trigger and job implementations.

use chrono::{DateTime, Utc};

/// Separator token used in description strings.
pub const SEP: &str = "::";

/// Current time as Unix epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Converts epoch milliseconds to a UTC instant, if representable.
pub fn millis_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}
