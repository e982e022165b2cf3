//! REST API module for HTTP endpoints
//!
//! - `POST /api/log` - Log a set
//! - `GET /api/logs` - Full log, most recent first
//! - `GET /api/stats/*` - Today, week, personal record, streaks, goal, progress
//! - `GET /api/export` and the coach routes - Plain-text export and AI feedback

pub mod coach;
pub mod logs;
pub mod stats;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::TrackerError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "VALIDATION_ERROR".to_string(),
        }
    }

    pub fn coach_unavailable(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "COACH_UNAVAILABLE".to_string(),
        }
    }

    pub fn coach_failed(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "COACH_ERROR".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
        }
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            TrackerError::Validation(message) => (StatusCode::BAD_REQUEST, ApiError::validation(message.as_str())),
            TrackerError::CoachUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::coach_unavailable(self.to_string()),
            ),
            TrackerError::Coach(_) | TrackerError::Http(_) => {
                error!(error = %self, "coach request failed");
                (StatusCode::BAD_GATEWAY, ApiError::coach_failed(self.to_string()))
            }
            TrackerError::Config(_) => {
                error!(error = %self, "configuration error while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal(self.to_string()))
            }
        };

        (status, Json(body)).into_response()
    }
}
