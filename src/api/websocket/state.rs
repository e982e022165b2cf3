//! Shared application state

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::info;

use super::events::{LogEvent, WsMessage};
use crate::coach::{AthleteStats, CoachProvider, OpenAiCoach};
use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::export::{ClockStyle, ExportFormatter};
use crate::log_store::LogStore;
use crate::stats::StatsEngine;
use crate::types::{LogEntry, Reps, DEFAULT_DAILY_GOAL};
use crate::utils::time::Calendar;

/// Shared state for REST handlers and WebSocket connections
pub struct AppState {
    /// The log
    pub store: Arc<LogStore>,

    /// Statistics over the log
    pub stats: StatsEngine,

    /// Renders the coaching export
    pub formatter: ExportFormatter,

    /// Coaching collaborator, if one is configured
    pub coach: Option<Arc<dyn CoachProvider>>,

    pub daily_goal: u32,

    pub athlete_profile: Option<String>,

    /// Stats the nutrition advice is tailored to
    pub athlete: AthleteStats,

    /// Broadcast channel for sending events to all connected clients
    pub event_tx: broadcast::Sender<WsMessage>,

    /// Monotonically increasing sequence counter
    pub sequence_counter: Arc<AtomicU64>,

    /// Held across append and broadcast so sequence ids follow entry ids
    record_lock: Mutex<()>,
}

impl AppState {
    /// Create state over `store` with no coach and the default goal
    pub fn new(store: Arc<LogStore>, calendar: Calendar, clock_style: ClockStyle) -> Self {
        // Buffer 256 events - if clients are too slow, they'll miss events
        // and need to do a full refresh
        let (event_tx, _) = broadcast::channel(256);

        Self {
            stats: StatsEngine::new(Arc::clone(&store), calendar),
            formatter: ExportFormatter::new(calendar, clock_style),
            store,
            coach: None,
            daily_goal: DEFAULT_DAILY_GOAL,
            athlete_profile: None,
            athlete: AthleteStats::default(),
            event_tx,
            sequence_counter: Arc::new(AtomicU64::new(0)),
            record_lock: Mutex::new(()),
        }
    }

    /// Build state from configuration, connecting the coach when a key is set
    pub fn from_config(store: Arc<LogStore>, config: &TrackerConfig) -> TrackerResult<Self> {
        let mut state = Self::new(store, config.calendar, config.clock_style)
            .with_daily_goal(config.daily_goal)
            .with_athlete(config.coach.athlete.clone());
        state.athlete_profile = config.coach.athlete_profile.clone();

        if let Some(openai) = &config.coach.openai {
            info!(model = %openai.model, base_url = %openai.base_url, "coach enabled");
            state = state.with_coach(Arc::new(OpenAiCoach::new(openai.clone())?));
        } else {
            info!("no OpenAI key configured, coach routes disabled");
        }

        Ok(state)
    }

    pub fn with_coach(mut self, coach: Arc<dyn CoachProvider>) -> Self {
        self.coach = Some(coach);
        self
    }

    pub fn with_daily_goal(mut self, goal: u32) -> Self {
        self.daily_goal = goal;
        self
    }

    pub fn with_athlete(mut self, athlete: AthleteStats) -> Self {
        self.athlete = athlete;
        self
    }

    /// Append a set to the store and notify subscribers
    pub fn record(&self, reps: Reps) -> LogEntry {
        let _guard = self.record_lock.lock();
        let entry = self.store.append(reps);
        self.broadcast(LogEvent::EntryLogged {
            payload: entry.clone(),
        });
        entry
    }

    /// The configured coach, or `CoachUnavailable`
    pub fn coach(&self) -> TrackerResult<&dyn CoachProvider> {
        self.coach
            .as_deref()
            .ok_or_else(|| TrackerError::CoachUnavailable("set OPENAI_API_KEY to enable coaching".to_string()))
    }

    /// Broadcast a log event to all connected WebSocket clients
    pub fn broadcast(&self, event: LogEvent) {
        let seq = self.sequence_counter.fetch_add(1, Ordering::SeqCst);
        let msg = WsMessage {
            event,
            sequence_id: seq,
            timestamp: self.stats.now().timestamp(),
        };

        // Ignore send errors - they just mean no receivers are listening
        let _ = self.event_tx.send(msg);
    }

    /// Get the current sequence ID
    pub fn current_sequence_id(&self) -> u64 {
        self.sequence_counter.load(Ordering::SeqCst)
    }

    /// Subscribe to receive broadcast events
    pub fn subscribe(&self) -> broadcast::Receiver<WsMessage> {
        self.event_tx.subscribe()
    }
}
