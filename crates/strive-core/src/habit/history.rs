//! Sparse per-date completion history.
//!
//! Only explicit completions are stored; a missing key means the date was
//! not completed. "Missed" is derived on read (see
//! [`crate::progress::DayStatus`]), never persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted per-date marker.
///
/// The application only ever writes `Completed`; `Missed` exists for
/// compatibility with legacy backend rows that stored it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMark {
    Completed,
    Missed,
}

/// Sparse completion record, keyed by local calendar date.
///
/// Serializes as `{"2024-01-05": "completed", ...}` to match the backend
/// column. A `BTreeMap` keeps iteration in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(BTreeMap<NaiveDate, DayMark>);

impl History {
    /// Empty history for a freshly created habit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `date` is marked completed.
    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.0.get(&date) == Some(&DayMark::Completed)
    }

    /// Flip the completion entry for `date`.
    ///
    /// A completed date loses its entry entirely (the map stays sparse);
    /// any other date gains a `Completed` mark. Returns the new state.
    /// Toggling twice restores the original history.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.is_completed(date) {
            self.0.remove(&date);
            false
        } else {
            self.0.insert(date, DayMark::Completed);
            true
        }
    }

    /// Number of completed entries.
    pub fn completed_count(&self) -> u32 {
        self.0
            .values()
            .filter(|m| **m == DayMark::Completed)
            .count() as u32
    }

    /// Number of stored entries of any kind.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, DayMark)> + '_ {
        self.0.iter().map(|(d, m)| (*d, *m))
    }
}

impl FromIterator<(NaiveDate, DayMark)> for History {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, DayMark)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
