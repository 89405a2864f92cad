//! Headline counters: messages, words, media, links.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::Record;

/// URL-like substrings: scheme-qualified or starting with `www.`.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"]+"#).expect("URL pattern is valid")
});

/// Key statistics of a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BasicStats {
    /// Number of records.
    pub messages: usize,
    /// Whitespace-delimited tokens across all bodies.
    pub words: usize,
    /// Records carrying the media placeholder.
    pub media: usize,
    /// URL-like substrings across all bodies.
    pub links: usize,
}

/// Computes [`BasicStats`] over a selection.
///
/// Every body counts toward `words`, including media placeholders and
/// system notifications.
pub fn basic_stats(records: &[&Record]) -> BasicStats {
    records.iter().fold(BasicStats::default(), |mut acc, r| {
        acc.messages += 1;
        acc.words += r.word_count();
        acc.media += usize::from(r.is_media);
        acc.links += count_links(&r.body);
        acc
    })
}

/// Counts URL-like substrings in a text.
pub fn count_links(text: &str) -> usize {
    URL_REGEX.find_iter(text).count()
}

/// Extracts URL-like substrings from a text.
pub fn extract_links(text: &str) -> Vec<&str> {
    URL_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}
