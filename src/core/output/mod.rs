//! Output writers.
//!
//! - [`write_json`] / [`to_json`] - a [`Report`](crate::core::Report) as pretty JSON
//! - [`write_jsonl`] / [`to_jsonl`] - parsed records, one JSON object per line
//! - [`write_csv`] / [`to_csv`] - parsed records as `;`-delimited CSV, requires `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::output::{write_json, write_jsonl};
//! use chatlens::core::{FilterConfig, Report};
//! use chatlens::parser::ChatParser;
//!
//! let chat = ChatParser::new().parse("chat.txt".as_ref())?;
//! let report = Report::build(&chat.records, &FilterConfig::new(), &AnalysisConfig::default())?;
//!
//! write_json(&report, "report.json")?;
//! write_jsonl(&chat.records, "records.jsonl")?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, write_json};
pub use jsonl_writer::{to_jsonl, write_jsonl};

/// Timestamp layout used by the record writers.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
