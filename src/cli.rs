//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Cli`] - top-level arguments and the [`Command`] subcommands
//! - [`ParseArgs`] - parser and config options shared by subcommands
//! - [`ReportFormat`] - how `analyze` prints its report
//! - [`RecordExport`] - the record export format, chosen by file extension
//!
//! Flags override values loaded from `--config`:
//!
//! ```rust
//! use chatlens::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["chatlens", "analyze", "chat.txt", "--preset", "auto", "--top-words", "5"]);
//! # let _ = cli;
//! ```

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, InvalidTimestampPolicy};
use crate::core::filter::{FilterConfig, OVERALL};
use crate::error::{ChatlensError, Result};

/// Analyze exported chat logs: message counts, top participants,
/// word frequencies, timelines and activity heatmaps.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens analyze chat.txt
    chatlens analyze chat.txt --user Alice --after 2023-01-01
    chatlens analyze chat.txt --format json -o report.json
    chatlens analyze chat.txt --preset auto --export-records records.csv
    chatlens senders chat.txt
    chatlens account signup alice --password s3cret")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse an export and print its statistics
    Analyze(AnalyzeArgs),

    /// List the sender filter choices of an export
    Senders(SendersArgs),

    /// Manage the local account store
    #[cfg(feature = "accounts")]
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

/// Parser and configuration options.
#[derive(Args, Debug, Clone, Default)]
pub struct ParseArgs {
    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Timestamp preset name, or "auto" to detect it
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Custom entry-start regex (use a named group `ts` for the timestamp)
    #[arg(long, value_name = "REGEX", requires = "date_format")]
    pub pattern: Option<String>,

    /// chrono format(s) for --pattern, tried in order
    #[arg(long = "date-format", value_name = "FMT", requires = "pattern")]
    pub date_format: Vec<String>,

    /// Media placeholder marker
    #[arg(long, value_name = "TEXT")]
    pub media_marker: Option<String>,

    /// Fail on the first invalid timestamp instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

impl ParseArgs {
    /// Loads `--config` (or defaults) and applies flag overrides.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(preset) = &self.preset {
            config.parser.preset.clone_from(preset);
        }
        if let Some(pattern) = &self.pattern {
            config.parser.pattern = Some(pattern.clone());
            config.parser.date_formats.clone_from(&self.date_format);
        }
        if let Some(marker) = &self.media_marker {
            config.parser.media_marker.clone_from(marker);
            config.analysis.media_marker.clone_from(marker);
        }
        if self.strict {
            config.parser.on_invalid_timestamp = InvalidTimestampPolicy::Fail;
        }
        Ok(config)
    }
}

/// Arguments of `chatlens analyze`.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the chat export
    pub input: PathBuf,

    /// Sender to analyze: "Overall", a sender name, or "group_notification"
    #[arg(short, long, value_name = "NAME", default_value = OVERALL)]
    pub user: String,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub parse: ParseArgs,

    /// Only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Size of the most-active ranking
    #[arg(long, value_name = "N")]
    pub top_senders: Option<usize>,

    /// Size of the most-common word table
    #[arg(long, value_name = "N")]
    pub top_words: Option<usize>,

    /// Also export parsed records (.csv or .jsonl)
    #[arg(long, value_name = "PATH")]
    pub export_records: Option<PathBuf>,

    /// Username, required when the config sets `require_login`
    #[arg(long, value_name = "USER", requires = "password")]
    pub login: Option<String>,

    /// Password for --login
    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,
}

impl AnalyzeArgs {
    /// Builds the record filter from `--user`, `--after` and `--before`.
    pub fn filter(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new().with_sender(self.user.as_str());
        if let Some(after) = &self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(before) = &self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }

    /// Loads configuration and applies every flag override.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = self.parse.load_config()?;
        if let Some(n) = self.top_senders {
            config.analysis.top_senders = n;
        }
        if let Some(n) = self.top_words {
            config.analysis.top_words = n;
        }
        Ok(config)
    }
}

/// Arguments of `chatlens senders`.
#[derive(Args, Debug, Clone)]
pub struct SendersArgs {
    /// Path to the chat export
    pub input: PathBuf,

    #[command(flatten)]
    pub parse: ParseArgs,
}

/// `chatlens account` actions.
#[cfg(feature = "accounts")]
#[derive(Subcommand, Debug, Clone)]
pub enum AccountAction {
    /// Register a new user
    Signup(AccountArgs),
    /// Check a username and password
    Login(AccountArgs),
}

/// Credentials and store location.
#[cfg(feature = "accounts")]
#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
    /// Username
    pub username: String,

    /// Password
    #[arg(long)]
    pub password: String,

    /// Account store file (overrides the config)
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(feature = "accounts")]
impl AccountArgs {
    /// Resolves the account store path.
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(store) = &self.store {
            return Ok(store.clone());
        }
        let config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        Ok(config.accounts.store_path)
    }
}

/// How `analyze` prints its report.
///
/// # Example
///
/// ```rust
/// use chatlens::cli::ReportFormat;
///
/// let format: ReportFormat = "json".parse().unwrap();
/// assert_eq!(format.to_string(), "JSON");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary (default)
    #[default]
    Text,

    /// Full report as pretty JSON
    Json,
}

impl ReportFormat {
    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "json"]
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "Text"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Record export format, picked from the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordExport {
    /// `;`-delimited CSV, requires the `csv-output` feature
    Csv,
    /// JSON Lines
    Jsonl,
}

impl RecordExport {
    /// Picks the export format for a path.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::InvalidFormat`] for any extension other than
    /// `.csv`, `.jsonl` or `.ndjson`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(RecordExport::Csv),
            Some("jsonl" | "ndjson") => Ok(RecordExport::Jsonl),
            _ => Err(ChatlensError::invalid_format(
                "record export",
                format!("'{}' must end in .csv or .jsonl", path.display()),
            )),
        }
    }
}
