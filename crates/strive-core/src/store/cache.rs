//! Local habit cache with fetch sequencing and per-habit write gating.
//!
//! The habit list lives in the backend; this cache holds the last
//! confirmed snapshot for the views. Two rules keep it coherent:
//!
//! - every fetch gets a monotonically increasing token at issue time, and
//!   a response is applied only if no newer response landed first, so a
//!   slow fetch overtaken by rapid navigation is discarded rather than
//!   clobbering fresher data;
//! - at most one write per habit may be in flight; the caller disables
//!   the toggle until the write resolves, so two rapid toggles cannot
//!   race on the same history map.
//!
//! The cache is stale from any local mutation until the next successful
//! fetch confirms the backend state.

use std::collections::HashSet;

use crate::habit::Habit;

/// Snapshot of the user's habits plus the bookkeeping to keep it honest.
#[derive(Debug, Default)]
pub struct HabitCache {
    habits: Vec<Habit>,
    issued_fetch: u64,
    applied_fetch: u64,
    stale: bool,
    writes_in_flight: HashSet<String>,
}

impl HabitCache {
    /// Empty cache; stale until the first fetch lands.
    pub fn new() -> Self {
        Self {
            stale: true,
            ..Self::default()
        }
    }

    /// The last confirmed habit list.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Look up a habit by id.
    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Whether the snapshot is known to lag the backend.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Mark the snapshot stale (call after any confirmed write).
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Issue a sequence token for a fetch about to start.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued_fetch += 1;
        self.issued_fetch
    }

    /// Apply a fetch result. Returns false (and changes nothing) if a
    /// response with a newer token was already applied.
    pub fn apply_fetch(&mut self, token: u64, habits: Vec<Habit>) -> bool {
        if token <= self.applied_fetch {
            return false;
        }
        self.applied_fetch = token;
        self.habits = habits;
        self.stale = false;
        true
    }

    /// Claim the write slot for a habit. Returns false if a write for
    /// that habit is already in flight, in which case the caller must
    /// not start another.
    pub fn begin_write(&mut self, id: &str) -> bool {
        self.writes_in_flight.insert(id.to_string())
    }

    /// Release the write slot once the backend confirmed or rejected the
    /// write.
    pub fn finish_write(&mut self, id: &str) {
        self.writes_in_flight.remove(id);
    }

    /// Whether a write for this habit is still unconfirmed.
    pub fn write_in_flight(&self, id: &str) -> bool {
        self.writes_in_flight.contains(id)
    }
}
