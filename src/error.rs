//! Error types for the tracker
//!
//! Aggregation never fails; errors only come from input validation, startup
//! configuration, and the coaching collaborator.

/// Errors surfaced by tracker operations
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Request input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// No coaching provider is configured
    #[error("Coach unavailable: {0}")]
    CoachUnavailable(String),

    /// The coaching provider answered with an error or an unreadable body
    #[error("Coach request failed: {0}")]
    Coach(String),

    /// Transport failure talking to the coaching provider
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid environment setting
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
