//! Derived statistics types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reps per day a fresh tracker aims for
pub const DEFAULT_DAILY_GOAL: u32 = 15;

/// Consecutive-day streaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streaks {
    /// Run of active days ending today (0 if today has no entry)
    pub current: u32,
    /// Longest run of active days in the whole log
    pub best: u32,
}

/// Today's total measured against the daily goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal: u32,
    #[serde(rename = "totalReps")]
    pub total_reps: u64,
    pub remaining: u64,
    /// Capped at 100
    pub percent: f64,
}

impl GoalProgress {
    pub fn new(goal: u32, total_reps: u64) -> Self {
        let goal_reps = u64::from(goal);
        let percent = if goal == 0 {
            100.0
        } else {
            (total_reps as f64 / goal_reps as f64 * 100.0).min(100.0)
        };

        Self {
            goal,
            total_reps,
            remaining: goal_reps.saturating_sub(total_reps),
            percent,
        }
    }

    pub fn is_met(&self) -> bool {
        self.remaining == 0
    }
}

/// Bucket size of a progress series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressView {
    #[default]
    Daily,
    Weekly,
}

impl ProgressView {
    /// Number of buckets shown when the caller does not ask for a count
    pub fn default_limit(self) -> usize {
        match self {
            ProgressView::Daily => 7,
            ProgressView::Weekly => 4,
        }
    }
}

/// One bucket of a progress series; weekly buckets are keyed by the week's first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub reps: u64,
}
