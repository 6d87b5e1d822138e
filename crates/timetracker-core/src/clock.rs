//! Wall-clock readings in milliseconds

use chrono::Utc;

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// This is not monotonic: if the host clock steps backwards between a start
/// and a stop the computed duration can be negative.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
