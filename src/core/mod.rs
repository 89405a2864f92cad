//! Aggregation over parsed records.
//!
//! This module contains:
//! - [`filter`] - Record selection by sender and date window
//! - [`analysis`] - The individual aggregation views
//! - [`report`] - All views bundled for one filter
//! - [`output`] - Report and record writers (JSON, JSONL, CSV)
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::{FilterConfig, Report};
//! use chatlens::parser::ChatParser;
//!
//! let chat = ChatParser::new().parse_str("01/01/23, 10:00 - Alice: hi")?;
//! let report = Report::build(&chat.records, &FilterConfig::new(), &AnalysisConfig::default())?;
//! assert_eq!(report.stats.messages, 1);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

pub mod analysis;
pub mod filter;
pub mod output;
pub mod report;

pub use filter::{FilterConfig, OVERALL, SenderFilter};
pub use report::Report;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
