//! Weekday, month and hour-of-day activity.
//!
//! Weekday and month maps always list every bucket in calendar order, with
//! zero counts where nothing was sent. The heatmap is a fixed 7x24 grid.

use serde::Serialize;

use crate::Record;
use crate::calendar::{MONTH_NAMES, WEEKDAY_NAMES, hour_bucket_labels, weekday_index};

/// Message count for one named bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityCount {
    pub label: &'static str,
    pub messages: usize,
}

/// Counts per weekday, Monday through Sunday.
pub fn weekday_activity(records: &[&Record]) -> Vec<ActivityCount> {
    let mut counts = [0usize; 7];
    for r in records {
        counts[weekday_index(r.weekday())] += 1;
    }
    labelled(&WEEKDAY_NAMES, &counts)
}

/// Counts per month name, January through December, across all years.
pub fn month_activity(records: &[&Record]) -> Vec<ActivityCount> {
    let mut counts = [0usize; 12];
    for r in records {
        if let Some(slot) = (r.month as usize).checked_sub(1).and_then(|i| counts.get_mut(i)) {
            *slot += 1;
        }
    }
    labelled(&MONTH_NAMES, &counts)
}

fn labelled(labels: &[&'static str], counts: &[usize]) -> Vec<ActivityCount> {
    labels
        .iter()
        .zip(counts)
        .map(|(&label, &messages)| ActivityCount { label, messages })
        .collect()
}

/// Weekday by hour-bucket message counts.
///
/// `cells[d][h]` counts messages sent on weekday `rows[d]` during hour `h`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    /// Weekday names, Monday first.
    pub rows: Vec<&'static str>,
    /// Hour-bucket labels, `"00-01"` through `"23-00"`.
    pub columns: Vec<String>,
    pub cells: Vec<Vec<usize>>,
}

impl Heatmap {
    /// Builds the grid for a selection. Empty buckets hold zero.
    pub fn build(records: &[&Record]) -> Self {
        let mut cells = vec![vec![0usize; 24]; 7];
        for r in records {
            cells[weekday_index(r.weekday())][(r.hour % 24) as usize] += 1;
        }
        Self {
            rows: WEEKDAY_NAMES.to_vec(),
            columns: hour_bucket_labels(),
            cells,
        }
    }

    /// Count for a weekday index (Monday = 0) and hour.
    pub fn get(&self, weekday: usize, hour: usize) -> Option<usize> {
        self.cells.get(weekday)?.get(hour).copied()
    }

    /// Sum of all cells.
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }
}

impl Default for Heatmap {
    fn default() -> Self {
        Self::build(&[])
    }
}
