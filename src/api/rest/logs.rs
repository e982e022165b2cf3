//! Log endpoints

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::websocket::state::AppState;
use crate::error::TrackerError;
use crate::types::LogEntry;
use crate::validation::parse_reps;

/// Body of `POST /api/log`
///
/// `reps` stays raw JSON so every bad shape gets the same validation error.
#[derive(Debug, Deserialize)]
pub struct LogRequest {
    #[serde(default)]
    pub reps: Option<Value>,
}

/// Response for `POST /api/log`
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub status: &'static str,
    pub log: LogEntry,
}

/// POST /api/log - Record a set
pub async fn create_log(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LogRequest>, JsonRejection>,
) -> Result<Json<LogResponse>, TrackerError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "rejected malformed log request");
        TrackerError::validation(rejection.body_text())
    })?;

    let reps = parse_reps(request.reps.as_ref()).map_err(|e| {
        warn!(error = %e, "rejected log request");
        e
    })?;

    let log = state.record(reps);
    info!(id = log.id, reps = log.reps, "logged set");

    Ok(Json(LogResponse {
        status: "logged",
        log,
    }))
}

/// GET /api/logs - All entries, most recent first
pub async fn list_logs(State(state): State<Arc<AppState>>) -> Json<Vec<LogEntry>> {
    Json(state.store.all())
}
