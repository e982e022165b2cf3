//! Statistics endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::websocket::state::AppState;
use crate::error::TrackerError;
use crate::types::{GoalProgress, LogEntry, ProgressPoint, ProgressView, Streaks};

/// Largest number of buckets a progress series returns
const MAX_PROGRESS_BUCKETS: usize = 366;

/// Response for the windowed stats endpoints
#[derive(Debug, Serialize)]
pub struct WindowStats {
    #[serde(rename = "totalReps")]
    pub total_reps: u64,
    pub logs: Vec<LogEntry>,
}

/// Response for GET /api/stats/pr
#[derive(Debug, Serialize)]
pub struct PersonalRecordResponse {
    #[serde(rename = "personalRecord")]
    pub personal_record: u64,
}

/// Query parameters for the progress series
#[derive(Debug, Deserialize)]
pub struct ProgressParams {
    #[serde(default)]
    pub view: ProgressView,
    /// Number of buckets (default: 7 days or 4 weeks)
    pub limit: Option<usize>,
}

/// GET /api/stats/today
pub async fn get_today(State(state): State<Arc<AppState>>) -> Json<WindowStats> {
    let snapshot = state.stats.snapshot();
    Json(WindowStats {
        total_reps: snapshot.total_today(),
        logs: snapshot.logs_today(),
    })
}

/// GET /api/stats/week
pub async fn get_week(State(state): State<Arc<AppState>>) -> Json<WindowStats> {
    let snapshot = state.stats.snapshot();
    Json(WindowStats {
        total_reps: snapshot.total_this_week(),
        logs: snapshot.logs_this_week(),
    })
}

/// GET /api/stats/pr - Best single-day total
pub async fn get_personal_record(State(state): State<Arc<AppState>>) -> Json<PersonalRecordResponse> {
    Json(PersonalRecordResponse {
        personal_record: state.stats.personal_record(),
    })
}

/// GET /api/stats/streaks
pub async fn get_streaks(State(state): State<Arc<AppState>>) -> Json<Streaks> {
    Json(state.stats.streaks())
}

/// GET /api/stats/goal - Today against the daily goal
pub async fn get_goal(State(state): State<Arc<AppState>>) -> Json<GoalProgress> {
    Json(state.stats.snapshot().goal_progress(state.daily_goal))
}

/// GET /api/stats/progress?view=daily|weekly&limit=N
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ProgressParams>, QueryRejection>,
) -> Result<Json<Vec<ProgressPoint>>, TrackerError> {
    let Query(params) = params.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "rejected progress query");
        TrackerError::validation(rejection.body_text())
    })?;

    let limit = params
        .limit
        .unwrap_or_else(|| params.view.default_limit())
        .min(MAX_PROGRESS_BUCKETS);
    Ok(Json(state.stats.snapshot().progress(params.view, limit)))
}
