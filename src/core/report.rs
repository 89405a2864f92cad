//! The full bundle of aggregation views for one filter.
//!
//! # Example
//!
//! ```
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::{FilterConfig, Report};
//! use chatlens::parser::ChatParser;
//!
//! let chat = ChatParser::new()
//!     .parse_str("01/01/23, 10:00 - Alice: hello\n01/01/23, 10:05 - Bob: hi Alice")?;
//!
//! let report = Report::build(&chat.records, &FilterConfig::new(), &AnalysisConfig::default())?;
//! assert_eq!(report.stats.messages, 2);
//! assert_eq!(report.stats.words, 3);
//! assert!(report.most_active.is_some());
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use serde::Serialize;
use tracing::debug;

use crate::Record;
use crate::config::AnalysisConfig;
use crate::core::analysis::{
    ActivityCount, BasicStats, DailyPoint, Heatmap, MonthlyPoint, MostActive, WordCount,
    basic_stats, daily_timeline, month_activity, monthly_timeline, most_active,
    most_common_words, weekday_activity, word_cloud_input,
};
use crate::core::filter::FilterConfig;
use crate::error::Result;

/// Every view computed over one filtered selection.
///
/// All fields are plain data; nothing here is formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Label of the sender filter (`"Overall"`, a name, or the system label).
    pub filter: String,
    pub stats: BasicStats,
    /// Present only for the `Overall` filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_active: Option<MostActive>,
    pub word_cloud: String,
    pub common_words: Vec<WordCount>,
    pub monthly_timeline: Vec<MonthlyPoint>,
    pub daily_timeline: Vec<DailyPoint>,
    pub weekday_activity: Vec<ActivityCount>,
    pub month_activity: Vec<ActivityCount>,
    pub heatmap: Heatmap,
}

impl Report {
    /// Selects records with `filter` and computes all views.
    ///
    /// # Errors
    ///
    /// Fails only if the configured stop-word file cannot be read.
    pub fn build(records: &[Record], filter: &FilterConfig, config: &AnalysisConfig) -> Result<Self> {
        let stop_words = config.resolve_stop_words()?;
        let selection = filter.select(records);
        debug!(
            filter = %filter.sender,
            selected = selection.len(),
            total = records.len(),
            "building report"
        );

        let most_active = filter
            .sender
            .is_overall()
            .then(|| most_active(&selection, config.top_senders));

        Ok(Self {
            filter: filter.sender.label().to_string(),
            stats: basic_stats(&selection),
            most_active,
            word_cloud: word_cloud_input(&selection, &stop_words, &config.media_marker),
            common_words: most_common_words(
                &selection,
                &stop_words,
                &config.media_marker,
                config.top_words,
            ),
            monthly_timeline: monthly_timeline(&selection),
            daily_timeline: daily_timeline(&selection),
            weekday_activity: weekday_activity(&selection),
            month_activity: month_activity(&selection),
            heatmap: Heatmap::build(&selection),
        })
    }

    /// Returns `true` when the filter selected no records.
    pub fn is_empty(&self) -> bool {
        self.stats.messages == 0
    }
}
