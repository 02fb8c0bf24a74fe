use chrono::{DateTime, Duration, Utc};

/// Default lookback window
pub const DEFAULT_MAX_AGE_DAYS: i64 = 60;

/// True unless `published_at` is older than `max_age` relative to `now`.
///
/// Undated entries pass. Entries dated in the future pass as well.
pub fn is_recent(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>, max_age: Duration) -> bool {
    match published_at {
        Some(published) => now.signed_duration_since(published) <= max_age,
        None => true,
    }
}
