//! HTTP server setup with Axum

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::rest::{coach, logs, stats};
use super::websocket::{handler::ws_handler, state::AppState};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins, the dashboard is served elsewhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(ws_handler))
        // Health check
        .route("/health", get(health_check))
        // Log
        .route("/api/log", post(logs::create_log))
        .route("/api/logs", get(logs::list_logs))
        // Stats
        .route("/api/stats/today", get(stats::get_today))
        .route("/api/stats/week", get(stats::get_week))
        .route("/api/stats/pr", get(stats::get_personal_record))
        .route("/api/stats/streaks", get(stats::get_streaks))
        .route("/api/stats/goal", get(stats::get_goal))
        .route("/api/stats/progress", get(stats::get_progress))
        // Export and coach
        .route("/api/export", get(coach::get_export))
        .route("/api/send-to-gpt", post(coach::send_to_coach))
        .route("/api/cron-send-daily", get(coach::cron_send_daily))
        .route("/api/fitness-assistant/analyze", post(coach::analyze_workout))
        .route("/api/fitness-assistant/nutrition", post(coach::nutrition_advice))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
