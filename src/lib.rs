//! Pull-up Tracker
//!
//! A personal pull-up log with daily and weekly totals, personal records,
//! streaks, and an AI coaching export, served over a small HTTP API.
//!
//! # Features
//!
//! - **Append-only log**: Thread-safe in-memory store with monotonic ids
//! - **Calendar-aware stats**: Today, this week, best day, streaks, goal progress
//! - **Injectable time**: Clock and UTC offset are configuration, never ambient
//! - **Coaching export**: Plain-text report for an OpenAI-compatible coach
//! - **Live updates**: WebSocket push of every logged set
//!
//! # Modules
//!
//! - `types`: Core data structures (LogEntry, Reps, Streaks, GoalProgress)
//! - `log_store`: Append-only log of sets
//! - `stats`: Aggregations over a log snapshot
//! - `export`: Plain-text coaching report
//! - `coach`: Coaching collaborator and prompts
//! - `validation`: Reps validation for incoming requests
//! - `api`: REST routes and WebSocket updates
//! - `config`: Environment-driven settings
//! - `utils`: Clock and calendar arithmetic
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pullup_tracker::{LogStore, Reps, StatsEngine};
//! use pullup_tracker::utils::Calendar;
//!
//! let store = Arc::new(LogStore::new());
//! store.append(Reps::new(8).unwrap());
//!
//! let stats = StatsEngine::new(store, Calendar::utc());
//! println!("today: {} reps", stats.total_today());
//! ```

pub mod api;
pub mod coach;
pub mod config;
pub mod error;
pub mod export;
pub mod log_store;
pub mod logging;
pub mod stats;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use coach::{AthleteStats, CoachProvider, OpenAiCoach, WorkoutSnapshot};
pub use config::TrackerConfig;
pub use error::{TrackerError, TrackerResult};
pub use export::{ClockStyle, ExportFormatter};
pub use log_store::LogStore;
pub use stats::{StatsEngine, StatsSnapshot};
pub use types::{GoalProgress, LogEntry, ProgressPoint, ProgressView, Reps, Streaks};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
