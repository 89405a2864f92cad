//! Calendar-order lookup tables.
//!
//! Activity maps must be ordered Monday..Sunday and January..December.
//! Sorting names as strings gives Friday first and April first, so every view
//! enumerates buckets through these tables instead.

use chrono::Weekday;

/// Weekday names, index 0 = Monday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Month names, index 0 = January.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the calendar index of a weekday (Monday = 0).
pub fn weekday_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// Returns the display name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday_index(day)]
}

/// Returns the display name of a month number (1-12).
///
/// Out-of-range numbers yield `None`.
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = month.checked_sub(1)? as usize;
    MONTH_NAMES.get(idx).copied()
}

/// Heatmap column label for an hour: `"13-14"`, `"23-00"`.
pub fn hour_bucket_label(hour: u32) -> String {
    format!("{:02}-{:02}", hour % 24, (hour + 1) % 24)
}

/// All 24 hour-bucket labels in order.
pub fn hour_bucket_labels() -> Vec<String> {
    (0..24).map(hour_bucket_label).collect()
}
