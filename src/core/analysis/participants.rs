//! Per-sender message counts and the most-active ranking.

use std::collections::HashMap;

use serde::Serialize;

use crate::Record;

/// Messages sent by one sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderCount {
    pub sender: String,
    pub messages: usize,
}

/// A sender's share of all attributed messages, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderShare {
    pub sender: String,
    /// Rounded to two decimal places.
    pub percent: f64,
}

/// The "most active participants" view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MostActive {
    /// Top senders by message count.
    pub top: Vec<SenderCount>,
    /// Every sender's share of attributed messages.
    pub shares: Vec<SenderShare>,
}

/// Counts messages per sender label, system notifications included.
///
/// Sorted by count descending, then by label ascending. The counts always
/// sum to the selection size.
pub fn sender_counts(records: &[&Record]) -> Vec<SenderCount> {
    rank(records.iter().map(|r| r.sender_label()))
}

/// Ranks senders, excluding system notifications.
///
/// `top` keeps the first `top_n` senders by count (ties broken
/// alphabetically); `shares` lists all senders in the same order, as a
/// percentage of all non-system messages.
pub fn most_active(records: &[&Record], top_n: usize) -> MostActive {
    let counts = rank(records.iter().filter_map(|r| r.sender.as_deref()));
    let total: usize = counts.iter().map(|c| c.messages).sum();

    let shares = counts
        .iter()
        .map(|c| SenderShare {
            sender: c.sender.clone(),
            percent: percent(c.messages, total),
        })
        .collect();

    MostActive {
        top: counts.into_iter().take(top_n).collect(),
        shares,
    }
}

fn rank<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<SenderCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut ranked: Vec<SenderCount> = counts
        .into_iter()
        .map(|(sender, messages)| SenderCount {
            sender: sender.to_string(),
            messages,
        })
        .collect();
    ranked.sort_by(|a, b| b.messages.cmp(&a.messages).then_with(|| a.sender.cmp(&b.sender)));
    ranked
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}
