//! Configuration types for parsing, analysis and accounts.
//!
//! Every struct has sensible defaults and builder methods for library use.
//! The CLI can also load an [`AppConfig`] from a TOML file, where every
//! section and key is optional:
//!
//! ```toml
//! [parser]
//! preset = "auto"
//! media_marker = "<Media omitted>"
//! on_invalid_timestamp = "skip"
//!
//! [analysis]
//! top_senders = 5
//! top_words = 20
//! stop_words_file = "stop_words.txt"
//!
//! [accounts]
//! store_path = "users_db.json"
//! require_login = false
//! ```
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{InvalidTimestampPolicy, ParserConfig};
//! use chatlens::parser::ChatParser;
//!
//! let config = ParserConfig::new()
//!     .with_preset_name("eu-dot")
//!     .with_invalid_timestamp_policy(InvalidTimestampPolicy::Fail);
//!
//! let parser = ChatParser::with_config(config);
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};
use crate::parsing::{DEFAULT_MEDIA_MARKER, TimestampFormat, TimestampPreset};

/// Preset name that turns on format auto-detection.
pub const AUTO_PRESET: &str = "auto";

/// What the parser does with a timestamp that matches the pattern but is not
/// a valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidTimestampPolicy {
    /// Drop the entry, count it and keep going (default).
    #[default]
    Skip,
    /// Abort the whole file with [`ChatlensError::MalformedTimestamp`].
    Fail,
}

/// How the parser picks its [`TimestampFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSelection {
    /// Detect from the first lines of the export.
    Auto,
    /// Use a built-in preset.
    Preset(TimestampPreset),
    /// Use a caller-supplied pattern and formats.
    Custom(TimestampFormat),
}

/// Configuration for chat export parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Preset name, or `"auto"` (default: `"android-slash"`)
    pub preset: String,

    /// Custom entry-start pattern; overrides `preset` when set
    pub pattern: Option<String>,

    /// chrono formats for a custom pattern
    pub date_formats: Vec<String>,

    /// Placeholder the exporter writes instead of attachments
    pub media_marker: String,

    /// Skip or fail on unparseable timestamps (default: skip)
    pub on_invalid_timestamp: InvalidTimestampPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            preset: TimestampPreset::default().to_string(),
            pattern: None,
            date_formats: Vec::new(),
            media_marker: DEFAULT_MEDIA_MARKER.to_string(),
            on_invalid_timestamp: InvalidTimestampPolicy::Skip,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a preset by name (`"auto"` enables detection).
    #[must_use]
    pub fn with_preset_name(mut self, name: impl Into<String>) -> Self {
        self.preset = name.into();
        self
    }

    /// Selects a built-in preset.
    #[must_use]
    pub fn with_preset(self, preset: TimestampPreset) -> Self {
        self.with_preset_name(preset.to_string())
    }

    /// Enables format auto-detection.
    #[must_use]
    pub fn with_auto_detect(self) -> Self {
        self.with_preset_name(AUTO_PRESET)
    }

    /// Uses a custom timestamp format instead of a preset.
    #[must_use]
    pub fn with_format(mut self, format: TimestampFormat) -> Self {
        self.pattern = Some(format.pattern);
        self.date_formats = format.date_formats;
        self
    }

    /// Sets the media placeholder marker.
    #[must_use]
    pub fn with_media_marker(mut self, marker: impl Into<String>) -> Self {
        self.media_marker = marker.into();
        self
    }

    /// Sets the invalid timestamp policy.
    #[must_use]
    pub fn with_invalid_timestamp_policy(mut self, policy: InvalidTimestampPolicy) -> Self {
        self.on_invalid_timestamp = policy;
        self
    }

    /// Resolves the preset/pattern settings.
    pub fn format_selection(&self) -> Result<FormatSelection> {
        if let Some(pattern) = &self.pattern {
            if self.date_formats.is_empty() {
                return Err(ChatlensError::invalid_format(
                    "timestamp pattern",
                    "a custom pattern needs at least one date format",
                ));
            }
            return Ok(FormatSelection::Custom(TimestampFormat::new(
                pattern.clone(),
                self.date_formats.iter().cloned(),
            )));
        }

        if self.preset.eq_ignore_ascii_case(AUTO_PRESET) {
            return Ok(FormatSelection::Auto);
        }
        Ok(FormatSelection::Preset(self.preset.parse()?))
    }
}

/// Configuration for aggregation views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How many senders the most-active ranking keeps (default: 5)
    pub top_senders: usize,

    /// How many words the most-common table keeps (default: 20)
    pub top_words: usize,

    /// Replaces the built-in stop-word list when non-empty
    pub stop_words: Vec<String>,

    /// Newline-separated stop-word file; takes precedence over `stop_words`
    pub stop_words_file: Option<PathBuf>,

    /// Media placeholder removed from the word corpus.
    ///
    /// Not read from config files: [`AppConfig`] always copies
    /// `[parser] media_marker` here so parsing and word filtering agree.
    #[serde(skip)]
    pub media_marker: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_senders: 5,
            top_words: 20,
            stop_words: Vec::new(),
            stop_words_file: None,
            media_marker: DEFAULT_MEDIA_MARKER.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the most-active ranking.
    #[must_use]
    pub fn with_top_senders(mut self, n: usize) -> Self {
        self.top_senders = n;
        self
    }

    /// Sets the size of the most-common word table.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Replaces the stop-word list.
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Loads stop words from a newline-separated file.
    #[must_use]
    pub fn with_stop_words_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stop_words_file = Some(path.into());
        self
    }

    /// Sets the media placeholder removed from the word corpus.
    #[must_use]
    pub fn with_media_marker(mut self, marker: impl Into<String>) -> Self {
        self.media_marker = marker.into();
        self
    }

    /// Resolves the effective, lowercased stop-word set.
    pub fn resolve_stop_words(&self) -> Result<HashSet<String>> {
        if let Some(path) = &self.stop_words_file {
            let content = fs::read_to_string(path)?;
            return Ok(content
                .lines()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect());
        }

        if self.stop_words.is_empty() {
            return Ok(DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect());
        }

        Ok(self.stop_words.iter().map(|w| w.to_lowercase()).collect())
    }
}

/// Configuration for the local account store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    /// JSON file mapping usernames to password hashes
    pub store_path: PathBuf,

    /// Require `--login`/`--password` before `analyze` runs
    pub require_login: bool,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("users_db.json"),
            require_login: false,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub parser: ParserConfig,
    pub analysis: AnalysisConfig,
    pub accounts: AccountsConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)
            .map_err(|e| ChatlensError::config(Some(path.to_path_buf()), e.to_string()))?;

        // Relative paths resolve against the config file.
        if let Some(dir) = path.parent() {
            if let Some(file) = &config.analysis.stop_words_file {
                if file.is_relative() {
                    config.analysis.stop_words_file = Some(dir.join(file));
                }
            }
            if config.accounts.store_path.is_relative() {
                config.accounts.store_path = dir.join(&config.accounts.store_path);
            }
        }
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: AppConfig =
            toml::from_str(content).map_err(|e| ChatlensError::config(None, e.to_string()))?;
        // One marker drives both parsing and word filtering.
        config.analysis.media_marker = config.parser.media_marker.clone();
        Ok(config)
    }
}

/// Built-in English stop words.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "i'm", "if", "in", "into", "is", "it", "it's", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "ok", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
    "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parser_config_default() {
        let config = ParserConfig::default();
        assert_eq!(config.preset, "android-slash");
        assert_eq!(config.media_marker, "<Media omitted>");
        assert_eq!(config.on_invalid_timestamp, InvalidTimestampPolicy::Skip);
        assert_eq!(
            config.format_selection().unwrap(),
            FormatSelection::Preset(TimestampPreset::AndroidSlash)
        );
    }

    #[test]
    fn test_parser_config_auto() {
        let config = ParserConfig::new().with_auto_detect();
        assert_eq!(config.format_selection().unwrap(), FormatSelection::Auto);
    }

    #[test]
    fn test_parser_config_custom_format() {
        let format = TimestampFormat::new(r"^(?P<ts>\d+) ", ["%s"]);
        let config = ParserConfig::new().with_format(format.clone());
        assert_eq!(
            config.format_selection().unwrap(),
            FormatSelection::Custom(format)
        );
    }

    #[test]
    fn test_custom_pattern_without_formats_rejected() {
        let config = ParserConfig {
            pattern: Some(r"^\d+ ".into()),
            ..ParserConfig::default()
        };
        assert!(config.format_selection().unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let config = ParserConfig::new().with_preset_name("nope");
        assert!(config.format_selection().is_err());
    }

    #[test]
    fn test_analysis_config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_senders, 5);
        assert_eq!(config.top_words, 20);
        let stop = config.resolve_stop_words().unwrap();
        assert!(stop.contains("the"));
    }

    #[test]
    fn test_custom_stop_words_lowercased() {
        let config = AnalysisConfig::new().with_stop_words(["Hai", "HELLO"]);
        let stop = config.resolve_stop_words().unwrap();
        assert!(stop.contains("hai"));
        assert!(stop.contains("hello"));
        assert!(!stop.contains("the"));
    }

    #[test]
    fn test_stop_words_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hai\n\n  kya  \nHAI").unwrap();

        let config = AnalysisConfig::new()
            .with_stop_words(["ignored"])
            .with_stop_words_file(file.path());
        let stop = config.resolve_stop_words().unwrap();
        assert_eq!(stop.len(), 2);
        assert!(stop.contains("kya"));
    }

    #[test]
    fn test_app_config_from_toml() {
        let config = AppConfig::from_toml_str(
            r#"
[parser]
preset = "auto"
media_marker = "<attached>"
on_invalid_timestamp = "fail"

[analysis]
top_words = 10

[accounts]
require_login = true
"#,
        )
        .unwrap();

        assert_eq!(config.parser.format_selection().unwrap(), FormatSelection::Auto);
        assert_eq!(config.parser.on_invalid_timestamp, InvalidTimestampPolicy::Fail);
        assert_eq!(config.analysis.top_words, 10);
        assert_eq!(config.analysis.top_senders, 5);
        assert_eq!(config.analysis.media_marker, "<attached>");
        assert!(config.accounts.require_login);
        assert_eq!(config.accounts.store_path, PathBuf::from("users_db.json"));
    }

    #[test]
    fn test_app_config_relative_paths_follow_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chatlens.toml");
        std::fs::write(&path, "[accounts]\nstore_path = \"users.json\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.accounts.store_path, dir.path().join("users.json"));
    }

    #[test]
    fn test_analysis_media_marker_follows_parser() {
        let config = AppConfig::from_toml_str(
            r#"
[parser]
media_marker = "<attached>"

[analysis]
media_marker = "<ignored>"
"#,
        )
        .unwrap();
        assert_eq!(config.analysis.media_marker, "<attached>");

        let config = AppConfig::from_toml_str("[analysis]\nmedia_marker = \"<ignored>\"\n").unwrap();
        assert_eq!(config.analysis.media_marker, DEFAULT_MEDIA_MARKER);
    }

    #[test]
    fn test_app_config_empty_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_app_config_invalid_toml() {
        let err = AppConfig::from_toml_str("[parser\npreset = 1").unwrap_err();
        assert!(matches!(err, ChatlensError::Config { .. }));
    }
}
