//! Data types for the pull-up tracker
//!
//! This module contains the core data structures used throughout the application.

mod log_entry;
mod stats;

pub use log_entry::{LogEntry, Reps};
pub use stats::{GoalProgress, DEFAULT_DAILY_GOAL, ProgressPoint, ProgressView, Streaks};

/// Sum the reps of a slice of entries
pub fn sum_reps<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> u64 {
    entries.into_iter().map(|e| u64::from(e.reps)).sum()
}
