//! Select records by sender and date range.
//!
//! This module provides [`SenderFilter`], the "analyze for" choice of the
//! dashboard, and [`FilterConfig`], which adds an optional date window.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Sender | [`with_sender`](FilterConfig::with_sender) | `"Overall"`, a sender name, or system notifications |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//!
//! # Examples
//!
//! ```
//! use chatlens::core::filter::FilterConfig;
//! use chatlens::parser::ChatParser;
//!
//! let chat = ChatParser::new().parse_str(
//!     "01/01/23, 10:00 - Alice: hello\n01/01/23, 10:05 - Bob: hi\n02/01/23, 09:00 - Alice: again",
//! )?;
//!
//! let alice = FilterConfig::new().with_sender("Alice");
//! assert_eq!(alice.select(&chat.records).len(), 2);
//!
//! let overall = FilterConfig::new().with_sender("Overall");
//! assert_eq!(overall.select(&chat.records).len(), 3);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is exact (case-sensitive)
//! - A sender that never appears selects nothing; that is not an error
//! - Multiple filters are combined with AND logic

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::Record;
use crate::error::ChatlensError;
use crate::record::SYSTEM_SENDER;

/// Filter label meaning "every record".
pub const OVERALL: &str = "Overall";

/// Which records a view is computed over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SenderFilter {
    /// No filtering.
    #[default]
    Overall,
    /// System notifications only.
    System,
    /// Records whose sender equals the name exactly.
    Sender(String),
}

impl SenderFilter {
    /// Returns `true` if the record passes this filter.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            SenderFilter::Overall => true,
            SenderFilter::System => record.is_system(),
            SenderFilter::Sender(name) => record.sender.as_deref() == Some(name.as_str()),
        }
    }

    /// Returns `true` for [`SenderFilter::Overall`].
    pub fn is_overall(&self) -> bool {
        matches!(self, SenderFilter::Overall)
    }

    /// Returns the label shown for this filter.
    pub fn label(&self) -> &str {
        match self {
            SenderFilter::Overall => OVERALL,
            SenderFilter::System => SYSTEM_SENDER,
            SenderFilter::Sender(name) => name,
        }
    }
}

impl From<&str> for SenderFilter {
    fn from(s: &str) -> Self {
        match s {
            OVERALL => SenderFilter::Overall,
            SYSTEM_SENDER => SenderFilter::System,
            name => SenderFilter::Sender(name.to_string()),
        }
    }
}

impl From<String> for SenderFilter {
    fn from(s: String) -> Self {
        SenderFilter::from(s.as_str())
    }
}

impl From<SenderFilter> for String {
    fn from(filter: SenderFilter) -> Self {
        filter.label().to_string()
    }
}

impl FromStr for SenderFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SenderFilter::from(s))
    }
}

impl fmt::Display for SenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration for selecting records by sender and date.
///
/// # Examples
///
/// ```
/// use chatlens::core::filter::FilterConfig;
///
/// # fn main() -> chatlens::Result<()> {
/// let config = FilterConfig::new()
///     .with_sender("Alice")
///     .with_date_from("2023-06-01")?
///     .with_date_to("2023-12-31")?;
/// assert!(config.is_active());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Sender selection.
    pub sender: SenderFilter,

    /// Include only records on or after this time.
    pub after: Option<NaiveDateTime>,

    /// Include only records on or before this time.
    pub before: Option<NaiveDateTime>,
}

impl FilterConfig {
    /// Creates a filter that selects everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender filter from a label (`"Overall"`, a name, or
    /// `"group_notification"`).
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<SenderFilter>) -> Self {
        self.sender = sender.into();
        self
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_date(date_str)?;
        self.after = date.and_hms_opt(0, 0, 0);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_date(date_str)?;
        // End of the day to include the full day
        self.before = date.and_hms_opt(23, 59, 59);
        Ok(self)
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        !self.sender.is_overall() || self.has_date_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the record passes every active filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.sender.matches(record)
            && self.after.is_none_or(|after| record.timestamp >= after)
            && self.before.is_none_or(|before| record.timestamp <= before)
    }

    /// Returns the matching records, in their original order.
    pub fn select<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}
