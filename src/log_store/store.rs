//! Log Store - append-only arena of rep entries
//!
//! Entries live in a `Vec` in append order; ids come from a monotonic counter
//! that is bumped under the same write lock as the push.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::types::{LogEntry, Reps};
use crate::utils::time::{Clock, SystemClock};

#[derive(Debug)]
struct LogArena {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl Default for LogArena {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

/// In-memory store of logged sets
pub struct LogStore {
    arena: RwLock<LogArena>,
    clock: Arc<dyn Clock>,
}

impl LogStore {
    /// Create an empty store stamped by the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store stamped by the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            arena: RwLock::new(LogArena::default()),
            clock,
        }
    }

    /// The clock entries are stamped with
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Record a set: assign the next id, stamp the current instant, store it
    pub fn append(&self, reps: Reps) -> LogEntry {
        let mut arena = self.arena.write();
        let id = arena.next_id;
        arena.next_id += 1;

        let entry = LogEntry::new(id, reps, self.clock.now());
        arena.entries.push(entry.clone());
        debug!(id, reps = entry.reps, "appended log entry");
        entry
    }

    /// All entries, most recent first (ties broken by higher id first)
    pub fn all(&self) -> Vec<LogEntry> {
        let mut entries = self.arena.read().entries.clone();
        entries.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });
        entries
    }

    pub fn len(&self) -> usize {
        self.arena.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.read().entries.is_empty()
    }

    /// Id of the most recently appended entry, if any
    pub fn last_id(&self) -> Option<u64> {
        let arena = self.arena.read();
        arena.entries.last().map(|e| e.id)
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}
