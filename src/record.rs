//! Parsed message record.
//!
//! The parser turns every timestamped entry of an export into a [`Record`].
//! Calendar fields are derived once, at construction, so the aggregation
//! views never re-parse timestamps.
//!
//! # Examples
//!
//! ```
//! use chatlens::Record;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 5, 0)
//!     .unwrap();
//! let record = Record::new(ts, Some("Alice".into()), "hello", false);
//!
//! assert_eq!(record.sender_label(), "Alice");
//! assert_eq!(record.day_name, "Sunday");
//! assert_eq!(record.month_name, "January");
//! assert_eq!(record.hour, 10);
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::calendar;

/// Label used for records without a sender (group events, encryption
/// notices, ...).
pub const SYSTEM_SENDER: &str = "group_notification";

/// One parsed entry of a chat export.
///
/// | Field | Description |
/// |-------|-------------|
/// | `timestamp` | Date and time printed in the export |
/// | `sender` | Author, `None` for system notifications |
/// | `body` | Message text, may span several lines |
/// | `is_media` | Body contains the media placeholder |
/// | `date` .. `day_name` | Calendar fields derived from `timestamp` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// When the message was sent, in the exporter's local time.
    pub timestamp: NaiveDateTime,

    /// Display name of the author. `None` marks a system notification.
    pub sender: Option<String>,

    /// Raw message text. Media placeholders are kept verbatim.
    pub body: String,

    /// `true` when the body carries the media placeholder marker.
    pub is_media: bool,

    /// Calendar date of `timestamp`.
    pub date: NaiveDate,
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    pub month_name: &'static str,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub day_name: &'static str,
}

impl Record {
    /// Creates a record and derives its calendar fields.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: Option<String>,
        body: impl Into<String>,
        is_media: bool,
    ) -> Self {
        let date = timestamp.date();
        let month = date.month();
        Self {
            timestamp,
            sender,
            body: body.into(),
            is_media,
            date,
            year: date.year(),
            month,
            month_name: calendar::month_name(month).unwrap_or_default(),
            day: date.day(),
            hour: timestamp.hour(),
            minute: timestamp.minute(),
            day_name: calendar::weekday_name(date.weekday()),
        }
    }

    /// Returns `true` for system notifications.
    pub fn is_system(&self) -> bool {
        self.sender.is_none()
    }

    /// Returns the sender name, or [`SYSTEM_SENDER`] for system notifications.
    pub fn sender_label(&self) -> &str {
        self.sender.as_deref().unwrap_or(SYSTEM_SENDER)
    }

    /// Returns the day of week.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns the number of whitespace-delimited tokens in the body.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }
}
