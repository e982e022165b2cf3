//! Logged rep events

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// A validated, positive rep count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Reps(u32);

impl Reps {
    /// Wrap a rep count, rejecting zero
    pub fn new(reps: u32) -> TrackerResult<Self> {
        if reps == 0 {
            return Err(TrackerError::validation("reps must be at least 1"));
        }
        Ok(Self(reps))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Reps {
    type Error = TrackerError;

    fn try_from(reps: u32) -> TrackerResult<Self> {
        Self::new(reps)
    }
}

impl From<Reps> for u32 {
    fn from(reps: Reps) -> Self {
        reps.0
    }
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One recorded set of pull-ups
///
/// `id` and `timestamp` are assigned by the store when the entry is appended;
/// entries are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub reps: u32,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub(crate) fn new(id: u64, reps: Reps, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            reps: reps.get(),
            timestamp,
        }
    }
}
