//! Time formatting and countdown helpers.

use scholarpass_types::Timestamp;

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Whole days from `now` until `until`, rounded up. Zero once reached.
///
/// A gate expiring later today still reports one remaining day, so a
/// "days remaining" figure shown to a user never reads 0 while the gate
/// is still closed.
pub fn days_until(until: Timestamp, now: Timestamp) -> u64 {
    now.seconds_until(until).div_ceil(86_400)
}
