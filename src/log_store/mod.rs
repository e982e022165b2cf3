//! Log Store Module
//!
//! Holds every logged set for the lifetime of the process. The store is the
//! only source of truth; statistics are derived from snapshots of it.
//!
//! ```text
//! POST /api/log ──► validation::parse_reps ──► LogStore::append ──► LogEntry { id, reps, timestamp }
//! GET  /api/*   ──► LogStore::all (snapshot) ──► stats / export
//! ```

mod store;

pub use store::LogStore;
