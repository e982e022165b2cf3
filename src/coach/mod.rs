//! Coaching collaborator
//!
//! The tracker hands its numbers to a chat-completions model and returns
//! whatever text comes back. What the model says is not interpreted; the crate
//! only owns the payload it sends.
//!
//! - `CoachProvider`: the seam to the model (`OpenAiCoach` in production)
//! - `review_export`: the plain-text export, reviewed by a concise coach
//! - `analyze_workout`: a [`WorkoutSnapshot`] analysed in depth
//! - `nutrition_advice`: body-recomposition nutrition for the configured athlete

mod openai;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{TrackerError, TrackerResult};
use crate::export::ClockStyle;
use crate::stats::StatsSnapshot;

pub use openai::{OpenAiCoach, OpenAiConfig};

/// Number of latest sets included in a workout snapshot
pub const RECENT_LOG_LIMIT: usize = 10;

/// One chat exchange with the coaching model
#[derive(Debug, Clone, PartialEq)]
pub struct CoachRequest {
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CoachRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A model that answers coaching requests
#[async_trait]
pub trait CoachProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &str;

    async fn complete(&self, request: &CoachRequest) -> TrackerResult<String>;
}

/// A logged set as shown to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentLog {
    pub time: String,
    pub reps: u32,
}

/// Current numbers handed to the in-depth analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSnapshot {
    pub date: String,
    pub total_reps_today: u64,
    pub total_reps_week: u64,
    pub personal_record: u64,
    /// Latest sets, most recent first
    pub recent_logs: Vec<RecentLog>,
}

impl WorkoutSnapshot {
    pub fn capture(stats: &StatsSnapshot, clock_style: ClockStyle) -> Self {
        let calendar = stats.calendar();
        let recent_logs = stats
            .entries()
            .iter()
            .take(RECENT_LOG_LIMIT)
            .map(|e| RecentLog {
                time: clock_style.format_time(calendar.local_time(e.timestamp)),
                reps: e.reps,
            })
            .collect();

        Self {
            date: stats.today().format("%Y-%m-%d").to_string(),
            total_reps_today: stats.total_today(),
            total_reps_week: stats.total_this_week(),
            personal_record: stats.personal_record(),
            recent_logs,
        }
    }
}

/// Athlete details the nutrition advice is tailored to
///
/// Every field is optional; unset fields are left out of the prompt.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AthleteStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl AthleteStats {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Ask the coach to review the plain-text export
#[instrument(skip_all, fields(provider = provider.name()))]
pub async fn review_export(provider: &dyn CoachProvider, export_text: &str) -> TrackerResult<String> {
    let request = CoachRequest::new(prompts::EXPORT_REVIEW_SYSTEM, export_text);
    let reply = provider.complete(&request).await?;
    info!(reply_len = reply.len(), "coach reviewed export");
    Ok(reply)
}

/// Ask the coach for an in-depth analysis of the current numbers
#[instrument(skip_all, fields(provider = provider.name()))]
pub async fn analyze_workout(
    provider: &dyn CoachProvider,
    snapshot: &WorkoutSnapshot,
    profile: Option<&str>,
) -> TrackerResult<String> {
    let workout_json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| TrackerError::Coach(format!("failed to encode workout data: {}", e)))?;
    let request = CoachRequest::new(
        prompts::WORKOUT_ANALYSIS_SYSTEM,
        prompts::workout_analysis(snapshot, &workout_json, profile),
    )
    .with_temperature(0.7)
    .with_max_tokens(2000);

    let analysis = provider.complete(&request).await?;
    info!(reply_len = analysis.len(), "coach analysed workout");
    Ok(analysis)
}

/// Ask the coach for nutrition advice for `athlete`
#[instrument(skip_all, fields(provider = provider.name()))]
pub async fn nutrition_advice(
    provider: &dyn CoachProvider,
    athlete: &AthleteStats,
    profile: Option<&str>,
) -> TrackerResult<String> {
    let stats_json = serde_json::to_string_pretty(athlete)
        .map_err(|e| TrackerError::Coach(format!("failed to encode athlete stats: {}", e)))?;
    let request = CoachRequest::new(
        prompts::NUTRITION_SYSTEM,
        prompts::nutrition(athlete, &stats_json, profile),
    )
    .with_temperature(0.7)
    .with_max_tokens(2000);

    let advice = provider.complete(&request).await?;
    info!(reply_len = advice.len(), "coach gave nutrition advice");
    Ok(advice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogEntry;
    use crate::utils::time::Calendar;
    use chrono::{Duration, TimeZone, Utc};
    use parking_lot::Mutex;

    /// Records every request and answers with a canned reply
    struct RecordingCoach {
        reply: TrackerResult<String>,
        seen: Mutex<Vec<CoachRequest>>,
    }

    impl RecordingCoach {
        fn answering(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CoachProvider for RecordingCoach {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete(&self, request: &CoachRequest) -> TrackerResult<String> {
            self.seen.lock().push(request.clone());
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(e) => Err(TrackerError::Coach(e.to_string())),
            }
        }
    }

    fn stats_with(count: usize) -> StatsSnapshot {
        let start = Utc.with_ymd_and_hms(2026, 10, 16, 6, 0, 0).unwrap();
        let mut entries: Vec<LogEntry> = (0..count)
            .map(|i| LogEntry {
                id: i as u64 + 1,
                reps: 2,
                timestamp: start + Duration::minutes(i as i64 * 30),
            })
            .collect();
        entries.reverse();
        StatsSnapshot::new(entries, start + Duration::hours(12), Calendar::utc())
    }

    #[test]
    fn test_capture_takes_latest_ten() {
        let snapshot = WorkoutSnapshot::capture(&stats_with(14), ClockStyle::TwentyFourHour);

        assert_eq!(snapshot.date, "2026-10-16");
        assert_eq!(snapshot.total_reps_today, 28);
        assert_eq!(snapshot.personal_record, 28);
        assert_eq!(snapshot.recent_logs.len(), RECENT_LOG_LIMIT);
        // newest set is 06:00 + 13 * 30min
        assert_eq!(snapshot.recent_logs[0].time, "12:30");
    }

    #[tokio::test]
    async fn test_review_export_sends_text_verbatim() {
        let coach = RecordingCoach::answering("Nice work");
        let reply = review_export(&coach, "Total: 5 reps").await.unwrap();

        assert_eq!(reply, "Nice work");
        let seen = coach.seen.lock();
        assert_eq!(seen[0].user, "Total: 5 reps");
        assert_eq!(seen[0].system, prompts::EXPORT_REVIEW_SYSTEM);
        assert_eq!(seen[0].temperature, None);
    }

    #[tokio::test]
    async fn test_analyze_workout_embeds_snapshot() {
        let coach = RecordingCoach::answering("Train three times a week");
        let snapshot = WorkoutSnapshot::capture(&stats_with(2), ClockStyle::TwelveHour);

        let analysis = analyze_workout(&coach, &snapshot, Some("Age: 35")).await.unwrap();
        assert_eq!(analysis, "Train three times a week");

        let seen = coach.seen.lock();
        assert!(seen[0].user.contains("\"total_reps_today\": 4"));
        assert!(seen[0].user.contains("Age: 35"));
        assert_eq!(seen[0].max_tokens, Some(2000));
    }

    #[tokio::test]
    async fn test_nutrition_advice_embeds_athlete() {
        let coach = RecordingCoach::answering("Eat more protein");
        let athlete = AthleteStats {
            age: Some(62),
            current_weight: Some(172.0),
            goal: Some("lose 20 lbs".to_string()),
            ..Default::default()
        };

        let advice = nutrition_advice(&coach, &athlete, None).await.unwrap();
        assert_eq!(advice, "Eat more protein");

        let seen = coach.seen.lock();
        assert_eq!(seen[0].system, prompts::NUTRITION_SYSTEM);
        assert!(seen[0].user.contains("\"age\": 62"));
        assert!(seen[0].user.contains("\"goal\": \"lose 20 lbs\""));
        assert!(!seen[0].user.contains("goal_weight"));
    }

    #[tokio::test]
    async fn test_provider_errors_propagate() {
        let coach = RecordingCoach {
            reply: Err(TrackerError::Coach("rate limited".to_string())),
            seen: Mutex::new(Vec::new()),
        };

        let result = review_export(&coach, "Total: 0 reps").await;
        assert!(matches!(result, Err(TrackerError::Coach(_))));
    }
}
