//! Timestamp patterns for chat exports.
//!
//! Exports differ by app version and locale. A [`TimestampFormat`] pairs the
//! regular expression that finds the start of each entry with the chrono
//! formats used to read its date-time text. Built-in variants are available
//! as [`TimestampPreset`]s.
//!
//! Supported presets:
//! - Android: `15/01/24, 10:30 - Sender: Message`
//! - Android (US): `1/15/24, 10:30 PM - Sender: Message`
//! - Android, day-first 12-hour: `25/12/24, 9:41 pm - Sender: Message`
//! - iOS: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - EU dot, bracketed: `[15.01.24, 10:30:45] Sender: Message`
//! - EU dot: `15.01.2024, 10:30 - Sender: Message`
//! - EU slash, bracketed: `[15/01/2024, 10:30:45] Sender: Message`
//!
//! Day-first and month-first layouts look the same until a day exceeds 12.
//! [`TimestampPreset::detect`] keeps reading past its sample until such a
//! line settles the order; see its docs for what happens when none does.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChatlensError, Result};

/// Number of non-empty lines inspected by [`TimestampPreset::detect`].
pub const DETECTION_SAMPLE_LINES: usize = 20;

/// Name of the capture group holding the date-time text.
pub const TIMESTAMP_GROUP: &str = "ts";

/// Built-in timestamp layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampPreset {
    /// Day-first Android export: `DD/MM/YY, HH:MM - `
    #[default]
    AndroidSlash,
    /// Month-first Android export with 12-hour clock: `M/D/YY, H:MM PM - `
    AndroidUs,
    /// Day-first Android export with 12-hour clock: `DD/MM/YY, H:MM pm - `
    #[serde(rename = "android-slash-12h")]
    AndroidSlash12h,
    /// iOS export: `[M/D/YY, H:MM:SS AM] `
    UsBracketed,
    /// `[DD.MM.YY, HH:MM:SS] `
    EuDotBracketed,
    /// `DD.MM.YYYY, HH:MM - `
    EuDot,
    /// `[DD/MM/YYYY, HH:MM:SS] `, optionally with AM/PM
    EuSlashBracketed,
}

impl TimestampPreset {
    /// Returns the entry-start pattern for this preset.
    pub fn pattern(self) -> &'static str {
        match self {
            TimestampPreset::AndroidSlash => {
                r"^(?P<ts>\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2})\s-\s"
            }
            TimestampPreset::AndroidUs | TimestampPreset::AndroidSlash12h => {
                r"^(?P<ts>\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}\s[APap][Mm])\s-\s"
            }
            TimestampPreset::UsBracketed => {
                r"^\[(?P<ts>\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}(?::\d{2})?(?:\s[APap][Mm])?)\]\s"
            }
            TimestampPreset::EuDotBracketed => {
                r"^\[(?P<ts>\d{1,2}\.\d{1,2}\.\d{2,4},\s\d{1,2}:\d{2}(?::\d{2})?)\]\s"
            }
            TimestampPreset::EuDot => {
                r"^(?P<ts>\d{1,2}\.\d{1,2}\.\d{2,4},\s\d{1,2}:\d{2}(?::\d{2})?)\s-\s"
            }
            TimestampPreset::EuSlashBracketed => {
                r"^\[(?P<ts>\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}(?::\d{2})?(?:\s[APap][Mm])?)\]\s"
            }
        }
    }

    /// Returns chrono formats for this preset, tried in order.
    ///
    /// Two-digit years come first: `%Y` would happily read `24` as year 24.
    pub fn date_formats(self) -> &'static [&'static str] {
        match self {
            TimestampPreset::AndroidSlash => &["%d/%m/%y, %H:%M", "%d/%m/%Y, %H:%M"],
            TimestampPreset::AndroidUs => &["%m/%d/%y, %I:%M %p", "%m/%d/%Y, %I:%M %p"],
            TimestampPreset::AndroidSlash12h => &["%d/%m/%y, %I:%M %p", "%d/%m/%Y, %I:%M %p"],
            TimestampPreset::UsBracketed => &[
                "%m/%d/%y, %I:%M:%S %p",
                "%m/%d/%y, %I:%M %p",
                "%m/%d/%Y, %I:%M:%S %p",
                "%m/%d/%Y, %I:%M %p",
                "%m/%d/%y, %H:%M:%S",
                "%m/%d/%y, %H:%M",
                "%m/%d/%Y, %H:%M:%S",
                "%m/%d/%Y, %H:%M",
            ],
            TimestampPreset::EuDotBracketed | TimestampPreset::EuDot => &[
                "%d.%m.%y, %H:%M:%S",
                "%d.%m.%y, %H:%M",
                "%d.%m.%Y, %H:%M:%S",
                "%d.%m.%Y, %H:%M",
            ],
            TimestampPreset::EuSlashBracketed => &[
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
                "%d/%m/%y, %I:%M:%S %p",
                "%d/%m/%y, %I:%M %p",
                "%d/%m/%Y, %I:%M:%S %p",
                "%d/%m/%Y, %I:%M %p",
            ],
        }
    }

    /// Builds the [`TimestampFormat`] for this preset.
    pub fn format(self) -> TimestampFormat {
        TimestampFormat::new(
            self.pattern(),
            self.date_formats().iter().map(|f| (*f).to_string()),
        )
    }

    /// Returns all presets in detection priority order.
    pub fn all() -> &'static [TimestampPreset] {
        &[
            TimestampPreset::AndroidSlash,
            TimestampPreset::AndroidUs,
            TimestampPreset::AndroidSlash12h,
            TimestampPreset::UsBracketed,
            TimestampPreset::EuDotBracketed,
            TimestampPreset::EuDot,
            TimestampPreset::EuSlashBracketed,
        ]
    }

    /// Returns all preset names (including aliases).
    pub fn all_names() -> &'static [&'static str] {
        &[
            "android-slash",
            "android",
            "android-us",
            "android-slash-12h",
            "android-12h",
            "us-bracketed",
            "ios",
            "eu-dot-bracketed",
            "eu-dot",
            "eu-slash-bracketed",
        ]
    }

    /// Returns `true` when the day precedes the month.
    pub fn is_day_first(self) -> bool {
        !matches!(self, TimestampPreset::AndroidUs | TimestampPreset::UsBracketed)
    }

    /// Auto-detects the preset of `content`.
    ///
    /// A line scores for a preset when the pattern matches *and* the
    /// timestamp parses. Presets are scored on the first
    /// [`DETECTION_SAMPLE_LINES`] non-empty lines; when several share the
    /// top score, the whole export is scored, so one day above 12 anywhere
    /// separates day-first from month-first. A tie that survives that goes
    /// to the day-first preset for 24-hour timestamps, and to the earlier
    /// preset in [`all`](Self::all) (month-first) for AM/PM timestamps.
    /// Returns `None` when nothing matches.
    pub fn detect(content: &str) -> Option<TimestampPreset> {
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        let sample = &lines[..lines.len().min(DETECTION_SAMPLE_LINES)];

        let matchers: Vec<PresetMatcher> =
            Self::all().iter().filter_map(|&p| PresetMatcher::new(p)).collect();

        let mut tied = top_scoring(matchers.iter(), sample);
        if tied.len() > 1 && lines.len() > sample.len() {
            tied = top_scoring(tied.into_iter(), &lines);
        }

        let first = tied.first()?;
        if tied.len() > 1 {
            debug!(
                candidates = ?tied.iter().map(|m| m.preset).collect::<Vec<_>>(),
                "ambiguous timestamp layout"
            );
            if !first.has_meridiem(sample) {
                if let Some(day_first) = tied.iter().find(|m| m.preset.is_day_first()) {
                    return Some(day_first.preset);
                }
            }
        }
        Some(first.preset)
    }
}

/// A compiled preset used while scoring lines.
struct PresetMatcher {
    preset: TimestampPreset,
    format: TimestampFormat,
    regex: Regex,
}

impl PresetMatcher {
    fn new(preset: TimestampPreset) -> Option<Self> {
        let format = preset.format();
        let regex = format.compile().ok()?;
        Some(Self {
            preset,
            format,
            regex,
        })
    }

    fn accepts(&self, line: &str) -> bool {
        self.regex
            .captures(line)
            .and_then(|caps| self.format.parse_timestamp(timestamp_text(&caps)))
            .is_some()
    }

    fn score(&self, lines: &[&str]) -> usize {
        lines.iter().filter(|line| self.accepts(line)).count()
    }

    fn has_meridiem(&self, lines: &[&str]) -> bool {
        lines
            .iter()
            .filter_map(|line| self.regex.captures(line))
            .any(|caps| {
                let text = normalize_spaces(timestamp_text(&caps)).to_ascii_lowercase();
                let text = text.trim_end();
                text.ends_with("am") || text.ends_with("pm")
            })
    }
}

/// Matchers sharing the highest non-zero score, in input order.
fn top_scoring<'a>(
    matchers: impl Iterator<Item = &'a PresetMatcher>,
    lines: &[&str],
) -> Vec<&'a PresetMatcher> {
    let scored: Vec<(&PresetMatcher, usize)> = matchers.map(|m| (m, m.score(lines))).collect();
    let best = scored.iter().map(|&(_, score)| score).max().unwrap_or(0);
    if best == 0 {
        return Vec::new();
    }
    scored
        .into_iter()
        .filter(|&(_, score)| score == best)
        .map(|(m, _)| m)
        .collect()
}

impl fmt::Display for TimestampPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimestampPreset::AndroidSlash => "android-slash",
            TimestampPreset::AndroidUs => "android-us",
            TimestampPreset::AndroidSlash12h => "android-slash-12h",
            TimestampPreset::UsBracketed => "us-bracketed",
            TimestampPreset::EuDotBracketed => "eu-dot-bracketed",
            TimestampPreset::EuDot => "eu-dot",
            TimestampPreset::EuSlashBracketed => "eu-slash-bracketed",
        };
        f.write_str(name)
    }
}

impl FromStr for TimestampPreset {
    type Err = ChatlensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "android-slash" | "android" => Ok(TimestampPreset::AndroidSlash),
            "android-us" => Ok(TimestampPreset::AndroidUs),
            "android-slash-12h" | "android-12h" => Ok(TimestampPreset::AndroidSlash12h),
            "us-bracketed" | "ios" => Ok(TimestampPreset::UsBracketed),
            "eu-dot-bracketed" => Ok(TimestampPreset::EuDotBracketed),
            "eu-dot" => Ok(TimestampPreset::EuDot),
            "eu-slash-bracketed" => Ok(TimestampPreset::EuSlashBracketed),
            _ => Err(ChatlensError::invalid_format(
                "timestamp preset",
                format!(
                    "unknown preset '{}'. Expected one of: auto, {}",
                    s,
                    Self::all_names().join(", ")
                ),
            )),
        }
    }
}

/// An entry-start pattern plus the chrono formats for its timestamps.
///
/// The pattern is compiled in multi-line mode, so `^` anchors at every line
/// start. If it defines a `ts` capture group, only that text is handed to
/// chrono; otherwise the whole match is used with surrounding brackets,
/// dashes and whitespace trimmed.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::TimestampFormat;
///
/// let format = TimestampFormat::new(
///     r"^(?P<ts>\d{4}-\d{2}-\d{2} \d{2}:\d{2}) \| ",
///     ["%Y-%m-%d %H:%M"],
/// );
/// let ts = format.parse_timestamp("2024-03-01 18:45").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-01 18:45:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampFormat {
    /// Regular expression matching the timestamp + separator of each entry.
    pub pattern: String,
    /// chrono `strftime` formats, tried in order.
    pub date_formats: Vec<String>,
}

impl TimestampFormat {
    /// Creates a custom format.
    pub fn new<I, S>(pattern: impl Into<String>, date_formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern: pattern.into(),
            date_formats: date_formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Compiles the pattern in multi-line mode.
    ///
    /// Patterns that can match empty text are rejected: they would split the
    /// export between every character.
    pub fn compile(&self) -> Result<Regex> {
        let regex = RegexBuilder::new(&self.pattern)
            .multi_line(true)
            .build()
            .map_err(|e| ChatlensError::invalid_pattern(&self.pattern, e))?;

        if regex.is_match("") {
            return Err(ChatlensError::invalid_format(
                "timestamp pattern",
                format!("'{}' matches empty text", self.pattern),
            ));
        }
        Ok(regex)
    }

    /// Parses a timestamp string with the first format that accepts it.
    pub fn parse_timestamp(&self, raw: &str) -> Option<NaiveDateTime> {
        let normalized = normalize_spaces(raw);
        self.date_formats
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(normalized.trim(), fmt).ok())
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampPreset::default().format()
    }
}

impl From<TimestampPreset> for TimestampFormat {
    fn from(preset: TimestampPreset) -> Self {
        preset.format()
    }
}

/// Extracts the date-time text from an entry-start match.
pub fn timestamp_text<'h>(caps: &Captures<'h>) -> &'h str {
    if let Some(ts) = caps.name(TIMESTAMP_GROUP) {
        return ts.as_str();
    }
    caps.get(0)
        .map_or("", |m| m.as_str())
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '[' | ']'))
}

/// Newer exports put U+202F (narrow no-break space) before AM/PM.
fn normalize_spaces(raw: &str) -> String {
    raw.replace(['\u{202f}', '\u{a0}'], " ")
}
