//! Monthly and daily message timelines.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::Record;
use crate::calendar::month_name;

/// Message count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    /// `"<MonthName>-<Year>"`, e.g. `"January-2023"`.
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub messages: usize,
}

/// Message count for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub messages: usize,
}

/// Counts per (year, month), in chronological order.
///
/// Only months that contain at least one record appear.
pub fn monthly_timeline(records: &[&Record]) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for r in records {
        *buckets.entry((r.year, r.month)).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), messages)| MonthlyPoint {
            label: format!("{}-{year}", month_name(month).unwrap_or("Unknown")),
            year,
            month,
            messages,
        })
        .collect()
}

/// Counts per date, in chronological order.
pub fn daily_timeline(records: &[&Record]) -> Vec<DailyPoint> {
    let mut buckets: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in records {
        *buckets.entry(r.date).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(date, messages)| DailyPoint { date, messages })
        .collect()
}
