//! Aggregation views over a record selection.
//!
//! Every function takes the `&[&Record]` produced by
//! [`FilterConfig::select`](crate::core::filter::FilterConfig::select) and is
//! pure: the same selection always yields the same view.

pub mod activity;
pub mod participants;
pub mod stats;
pub mod timeline;
pub mod words;

pub use activity::{ActivityCount, Heatmap, month_activity, weekday_activity};
pub use participants::{MostActive, SenderCount, SenderShare, most_active, sender_counts};
pub use stats::{BasicStats, basic_stats, count_links, extract_links};
pub use timeline::{DailyPoint, MonthlyPoint, daily_timeline, monthly_timeline};
pub use words::{WordCount, corpus_tokens, most_common_words, word_cloud_input};
