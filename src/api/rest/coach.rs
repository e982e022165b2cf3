//! Export and coaching endpoints

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::api::websocket::state::AppState;
use crate::coach::{self, AthleteStats, WorkoutSnapshot};
use crate::error::TrackerError;
use crate::export::ExportFormatter;

/// Response for GET /api/export
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub export: String,
}

/// Response for POST /api/send-to-gpt
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

/// Response for GET /api/cron-send-daily
#[derive(Debug, Serialize)]
pub struct DailySendResponse {
    pub message: String,
    pub reply: String,
}

/// Response for POST /api/fitness-assistant/analyze
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub workout_data: WorkoutSnapshot,
}

/// Response for POST /api/fitness-assistant/nutrition
#[derive(Debug, Serialize)]
pub struct NutritionResponse {
    pub nutrition_advice: String,
    pub client_stats: AthleteStats,
}

/// Render the whole log oldest first
pub fn build_export_text(state: &AppState) -> String {
    let snapshot = state.stats.snapshot();
    let entries = ExportFormatter::chronological(snapshot.entries());
    state.formatter.format(&entries, snapshot.today())
}

/// GET /api/export - Plain-text report of the whole log
pub async fn get_export(State(state): State<Arc<AppState>>) -> Json<ExportResponse> {
    Json(ExportResponse {
        export: build_export_text(&state),
    })
}

/// POST /api/send-to-gpt - Send the export to the coach
pub async fn send_to_coach(State(state): State<Arc<AppState>>) -> Result<Json<ReplyResponse>, TrackerError> {
    let provider = state.coach()?;
    let reply = coach::review_export(provider, &build_export_text(&state)).await?;
    Ok(Json(ReplyResponse { reply }))
}

/// GET /api/cron-send-daily - Scheduled daily export to the coach
pub async fn cron_send_daily(State(state): State<Arc<AppState>>) -> Result<Json<DailySendResponse>, TrackerError> {
    let provider = state.coach()?;
    let reply = coach::review_export(provider, &build_export_text(&state)).await?;
    info!("daily export sent to coach");
    Ok(Json(DailySendResponse {
        message: "Daily export sent to coach.".to_string(),
        reply,
    }))
}

/// POST /api/fitness-assistant/analyze - In-depth analysis of current numbers
pub async fn analyze_workout(State(state): State<Arc<AppState>>) -> Result<Json<AnalysisResponse>, TrackerError> {
    let provider = state.coach()?;
    let workout_data = WorkoutSnapshot::capture(&state.stats.snapshot(), state.formatter.clock_style());
    let analysis = coach::analyze_workout(provider, &workout_data, state.athlete_profile.as_deref()).await?;
    Ok(Json(AnalysisResponse {
        analysis: analysis.trim().to_string(),
        workout_data,
    }))
}

/// POST /api/fitness-assistant/nutrition - Nutrition advice for the configured athlete
pub async fn nutrition_advice(State(state): State<Arc<AppState>>) -> Result<Json<NutritionResponse>, TrackerError> {
    let provider = state.coach()?;
    let advice = coach::nutrition_advice(provider, &state.athlete, state.athlete_profile.as_deref()).await?;
    Ok(Json(NutritionResponse {
        nutrition_advice: advice.trim().to_string(),
        client_stats: state.athlete.clone(),
    }))
}
