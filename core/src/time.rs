//! Time related utils.

use chrono::TimeZone;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime from current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Create a DateTime from seconds since unix epoch.
///
/// Returns `None` if the timestamp is out of range.
pub fn from_timestamp(secs: i64) -> Option<DateTime> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Add a std duration to the given time, then round down to whole seconds.
///
/// The sum is computed at full precision, so `T+0.9s` plus `0.5s` gives
/// `T+1`. Saturates at the maximum representable time.
pub fn add_seconds(time: DateTime, duration: std::time::Duration) -> DateTime {
    chrono::TimeDelta::from_std(duration)
        .ok()
        .and_then(|delta| time.checked_add_signed(delta))
        .and_then(|t| from_timestamp(t.timestamp()))
        .unwrap_or(DateTime::MAX_UTC)
}
