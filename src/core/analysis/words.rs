//! Word corpus, word cloud input and most-common words.
//!
//! The corpus is built from sender messages only: system notifications and
//! media records are left out, the media marker is removed, and tokens are
//! lowercased with surrounding ASCII punctuation trimmed before stop words
//! are dropped. Emoji and non-Latin tokens are kept.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::Record;

/// Occurrences of one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Builds the normalized token list of a selection, in reading order.
pub fn corpus_tokens(
    records: &[&Record],
    stop_words: &HashSet<String>,
    media_marker: &str,
) -> Vec<String> {
    records
        .iter()
        .filter(|r| !r.is_system() && !r.is_media)
        .flat_map(|r| {
            let body = if media_marker.is_empty() {
                r.body.to_lowercase()
            } else {
                r.body.replace(media_marker, " ").to_lowercase()
            };
            body.split_whitespace()
                .map(normalize_token)
                .filter(|t| !t.is_empty() && !stop_words.contains(*t))
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Text fed to a word-cloud renderer: corpus tokens joined by spaces.
pub fn word_cloud_input(
    records: &[&Record],
    stop_words: &HashSet<String>,
    media_marker: &str,
) -> String {
    corpus_tokens(records, stop_words, media_marker).join(" ")
}

/// The `top_n` most frequent corpus tokens.
///
/// Sorted by count descending; equal counts keep first-seen order.
pub fn most_common_words(
    records: &[&Record],
    stop_words: &HashSet<String>,
    media_marker: &str,
    top_n: usize,
) -> Vec<WordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for token in corpus_tokens(records, stop_words, media_marker) {
        match index.get(&token) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push(WordCount {
                    word: token,
                    count: 1,
                });
            }
        }
    }

    // Stable sort: ties stay in first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

fn normalize_token(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation())
}
