//! # Chatlens
//!
//! A Rust library for turning exported chat logs into activity statistics.
//!
//! ## Overview
//!
//! Chatlens reads the plain-text export a messaging app produces (one
//! `timestamp - sender: text` entry per message, continuation lines for
//! multi-line messages) and computes:
//! - message, word, media and link counts
//! - the most active participants and their share of the conversation
//! - word-cloud input and the most common words
//! - monthly and daily timelines
//! - weekday and month activity, and a weekday × hour heatmap
//!
//! The timestamp layout is pluggable: several presets ship with the crate,
//! one can be detected from the file, or a custom pattern can be supplied.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let chat = ChatParser::new()
//!         .parse_str("01/01/23, 10:00 - Alice: hello\n01/01/23, 10:05 - Bob: hi Alice")?;
//!
//!     let report = Report::build(&chat.records, &FilterConfig::new(), &AnalysisConfig::default())?;
//!     assert_eq!(report.stats.messages, 2);
//!     assert_eq!(report.stats.words, 3);
//!
//!     let bob = FilterConfig::new().with_sender("Bob");
//!     let report = Report::build(&chat.records, &bob, &AnalysisConfig::default())?;
//!     assert_eq!(report.stats.messages, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`]: [`ChatParser`](parser::ChatParser), [`ParsedChat`](parser::ParsedChat)
//! - [`parsing`]: timestamp presets, detection and the sender heuristic
//! - [`record`]: the parsed [`Record`]
//! - [`calendar`]: calendar-order weekday/month tables
//! - [`core`]: filtering, aggregation views, [`Report`](core::Report), writers
//! - [`config`]: parser, analysis and account configuration, TOML loading
//! - [`accounts`]: local credential store (feature `accounts`)
//! - [`cli`]: CLI argument types (feature `cli`)
//! - [`error`]: [`ChatlensError`], [`Result`]
//! - [`prelude`]: Convenient re-exports

#[cfg(feature = "accounts")]
pub mod accounts;
pub mod calendar;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod parser;
pub mod parsing;
pub mod record;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Record;
    pub use crate::error::{ChatlensError, Result};

    // Parsing
    pub use crate::parser::{ChatParser, ParsedChat};
    pub use crate::parsing::{TimestampFormat, TimestampPreset};

    // Configuration
    pub use crate::config::{AnalysisConfig, AppConfig, InvalidTimestampPolicy, ParserConfig};

    // Filtering and views
    pub use crate::core::analysis::*;
    pub use crate::core::{FilterConfig, Report, SenderFilter};

    // Output
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    #[cfg(feature = "accounts")]
    pub use crate::accounts::CredentialStore;
}
