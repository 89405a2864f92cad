//! Chat export parser.
//!
//! [`ChatParser`] turns the raw text of an export into an ordered list of
//! [`Record`]s:
//!
//! 1. find every entry start with the configured timestamp pattern;
//! 2. pair each timestamp with the text up to the next one (so multi-line
//!    messages stay whole), discarding whatever precedes the first match;
//! 3. parse the timestamp, split off the sender, flag media placeholders.
//!
//! Records keep the order in which they appear in the export.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::ChatParser;
//!
//! let text = "01/01/23, 10:00 - Alice: hello\n01/01/23, 10:05 - Bob: hi Alice";
//! let chat = ChatParser::new().parse_str(text)?;
//!
//! assert_eq!(chat.len(), 2);
//! assert_eq!(chat.records[0].sender.as_deref(), Some("Alice"));
//! assert_eq!(chat.records[1].body, "hi Alice");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::Record;
use crate::config::{FormatSelection, InvalidTimestampPolicy, ParserConfig};
use crate::core::filter::OVERALL;
use crate::error::{ChatlensError, Result};
use crate::parsing::{
    TimestampFormat, TimestampPreset, is_media, split_sender, timestamp_text, trim_entry_end,
};

/// Result of parsing one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedChat {
    /// Records in export order.
    pub records: Vec<Record>,

    /// Entries dropped because their timestamp did not parse.
    pub skipped: usize,

    /// Bytes of non-blank text found before the first timestamp.
    pub preamble_bytes: usize,

    /// Preset picked by auto-detection, if detection ran and succeeded.
    pub detected_preset: Option<TimestampPreset>,
}

impl ParsedChat {
    /// Number of parsed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the selectable sender filters: `"Overall"` followed by every
    /// distinct sender label in sorted order.
    pub fn senders(&self) -> Vec<String> {
        let labels: BTreeSet<&str> = self.records.iter().map(Record::sender_label).collect();
        std::iter::once(OVERALL)
            .chain(labels)
            .map(str::to_string)
            .collect()
    }

    /// Consumes the result, returning the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Parser for timestamped chat exports.
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses an export file.
    pub fn parse(&self, path: &Path) -> Result<ParsedChat> {
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "read chat export");
        self.parse_bytes(&bytes)
    }

    /// Decodes uploaded bytes as UTF-8 and parses them.
    ///
    /// Invalid UTF-8 is reported as [`ChatlensError::Decode`], never
    /// replaced.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedChat> {
        let content = String::from_utf8(bytes.to_vec())
            .map_err(|e| ChatlensError::decode("chat export", e))?;
        self.parse_str(&content)
    }

    /// Parses export text.
    ///
    /// A leading byte-order mark is ignored.
    pub fn parse_str(&self, content: &str) -> Result<ParsedChat> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut chat = ParsedChat::default();

        let format: TimestampFormat = match self.config.format_selection()? {
            FormatSelection::Auto => match TimestampPreset::detect(content) {
                Some(preset) => {
                    debug!(%preset, "detected timestamp format");
                    chat.detected_preset = Some(preset);
                    preset.format()
                }
                None => {
                    debug!("no known timestamp format found; treating export as empty");
                    chat.preamble_bytes = if content.trim().is_empty() { 0 } else { content.len() };
                    return Ok(chat);
                }
            },
            FormatSelection::Preset(preset) => preset.format(),
            FormatSelection::Custom(format) => format,
        };

        let regex = format.compile()?;

        let mut pending: Option<PendingEntry<'_>> = None;
        let mut cursor = 0;
        let mut line = 1;

        for caps in regex.captures_iter(content) {
            let Some(m) = caps.get(0) else { continue };
            let segment = &content[cursor..m.start()];
            line += content[cursor..m.start()].matches('\n').count();

            match pending.take() {
                Some(entry) => self.push_entry(&mut chat, &format, &entry, segment)?,
                None => {
                    if !segment.trim().is_empty() {
                        debug!(bytes = segment.len(), "dropping text before first timestamp");
                        chat.preamble_bytes = segment.len();
                    }
                }
            }

            pending = Some(PendingEntry {
                timestamp: timestamp_text(&caps),
                line,
            });
            line += m.as_str().matches('\n').count();
            cursor = m.end();
        }

        match pending {
            Some(entry) => self.push_entry(&mut chat, &format, &entry, &content[cursor..])?,
            None if !content.trim().is_empty() => {
                debug!("no timestamp matched; treating export as empty");
                chat.preamble_bytes = content.len();
            }
            None => {}
        }

        if chat.skipped > 0 {
            warn!(
                skipped = chat.skipped,
                parsed = chat.records.len(),
                "skipped entries with unparseable timestamps"
            );
        }
        debug!(records = chat.records.len(), "parsed chat export");

        Ok(chat)
    }

    fn push_entry(
        &self,
        chat: &mut ParsedChat,
        format: &TimestampFormat,
        entry: &PendingEntry<'_>,
        segment: &str,
    ) -> Result<()> {
        let Some(timestamp) = format.parse_timestamp(entry.timestamp) else {
            return match self.config.on_invalid_timestamp {
                InvalidTimestampPolicy::Fail => Err(ChatlensError::malformed_timestamp(
                    entry.line,
                    entry.timestamp,
                )),
                InvalidTimestampPolicy::Skip => {
                    warn!(line = entry.line, timestamp = entry.timestamp, "skipping entry");
                    chat.skipped += 1;
                    Ok(())
                }
            };
        };

        let (sender, body) = split_sender(segment);
        let body = trim_entry_end(body);
        let media = is_media(body, &self.config.media_marker);

        chat.records.push(Record::new(
            timestamp,
            sender.map(str::to_string),
            body,
            media,
        ));
        Ok(())
    }
}

/// A matched timestamp waiting for its body.
struct PendingEntry<'a> {
    timestamp: &'a str,
    line: usize,
}
