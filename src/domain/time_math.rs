//! Duration arithmetic and formatting helpers.
//!
//! Pure functions only; the services own all clock access.

use time::OffsetDateTime;

/// Whole seconds between two instants.
pub fn seconds_between(start: OffsetDateTime, end: OffsetDateTime) -> i64 {
    (end - start).whole_seconds()
}

/// Live elapsed seconds of a still-running session.
pub fn live_elapsed_seconds(start: OffsetDateTime, now: OffsetDateTime) -> i64 {
    seconds_between(start, now)
}

/// Format a second count as zero-padded `HH:MM:SS`.
///
/// Negative inputs clamp to zero; formatting never panics.
pub fn format_hms(seconds: i64) -> String {
    let secs = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Format a second count as `Xh Ym`, the short form used in timesheet
/// views.
pub fn format_hours_minutes(seconds: i64) -> String {
    let secs = seconds.max(0);
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}
