//! Aggregation Engine
//!
//! Statistics are pure functions over a snapshot of the log:
//! - `windows`: today / this week / before today / all-time totals
//! - `records`: per-day totals and the personal record
//! - `streaks`: current and best runs of active days
//! - `progress`: daily and weekly trend series
//!
//! Nothing is cached. [`StatsEngine`] takes a fresh [`StatsSnapshot`] for every
//! query, so a snapshot's answers are always consistent with one another.

pub mod progress;
pub mod records;
pub mod streaks;
pub mod windows;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::log_store::LogStore;
use crate::types::{GoalProgress, LogEntry, ProgressPoint, ProgressView, Streaks};
use crate::utils::time::{Calendar, Clock};

/// Entries and "now" frozen together, with the calendar to read them by
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    entries: Vec<LogEntry>,
    now: DateTime<Utc>,
    calendar: Calendar,
}

impl StatsSnapshot {
    /// `entries` are expected most recent first, as returned by `LogStore::all`
    pub fn new(entries: Vec<LogEntry>, now: DateTime<Utc>, calendar: Calendar) -> Self {
        Self {
            entries,
            now,
            calendar,
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn today(&self) -> NaiveDate {
        self.calendar.local_date(self.now)
    }

    pub fn total_today(&self) -> u64 {
        windows::total_today(&self.entries, &self.calendar, self.now)
    }

    pub fn logs_today(&self) -> Vec<LogEntry> {
        windows::today(&self.calendar, self.now).select(&self.entries)
    }

    pub fn total_this_week(&self) -> u64 {
        windows::total_this_week(&self.entries, &self.calendar, self.now)
    }

    pub fn logs_this_week(&self) -> Vec<LogEntry> {
        windows::this_week(&self.calendar, self.now).select(&self.entries)
    }

    pub fn total_before_today(&self) -> u64 {
        windows::total_before_today(&self.entries, &self.calendar, self.now)
    }

    pub fn total_all_time(&self) -> u64 {
        windows::total_all_time(&self.entries)
    }

    pub fn daily_totals(&self) -> BTreeMap<NaiveDate, u64> {
        records::daily_totals(&self.entries, &self.calendar)
    }

    pub fn personal_record(&self) -> u64 {
        records::personal_record(&self.entries, &self.calendar)
    }

    pub fn streaks(&self) -> Streaks {
        streaks::streaks(&self.entries, &self.calendar, self.now)
    }

    pub fn goal_progress(&self, goal: u32) -> GoalProgress {
        GoalProgress::new(goal, self.total_today())
    }

    pub fn progress(&self, view: ProgressView, limit: usize) -> Vec<ProgressPoint> {
        progress::progress(&self.entries, &self.calendar, view, limit)
    }
}

/// Computes statistics on demand from the store
#[derive(Clone)]
pub struct StatsEngine {
    store: Arc<LogStore>,
    clock: Arc<dyn Clock>,
    calendar: Calendar,
}

impl StatsEngine {
    /// Engine reading "now" from the same clock the store stamps entries with
    pub fn new(store: Arc<LogStore>, calendar: Calendar) -> Self {
        let clock = Arc::clone(store.clock());
        Self {
            store,
            clock,
            calendar,
        }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Freeze the current log and instant
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot::new(self.store.all(), self.clock.now(), self.calendar)
    }

    pub fn total_today(&self) -> u64 {
        self.snapshot().total_today()
    }

    pub fn total_this_week(&self) -> u64 {
        self.snapshot().total_this_week()
    }

    pub fn personal_record(&self) -> u64 {
        self.snapshot().personal_record()
    }

    pub fn streaks(&self) -> Streaks {
        self.snapshot().streaks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reps;
    use crate::utils::time::ManualClock;
    use chrono::{Duration, TimeZone};

    fn engine() -> (Arc<ManualClock>, Arc<LogStore>, StatsEngine) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(),
        ));
        let store = Arc::new(LogStore::with_clock(clock.clone()));
        let engine = StatsEngine::new(Arc::clone(&store), Calendar::utc());
        (clock, store, engine)
    }

    fn reps(n: u32) -> Reps {
        Reps::new(n).unwrap()
    }

    #[test]
    fn test_empty_engine() {
        let (_clock, _store, engine) = engine();
        assert_eq!(engine.total_today(), 0);
        assert_eq!(engine.total_this_week(), 0);
        assert_eq!(engine.personal_record(), 0);
        assert_eq!(engine.streaks(), Streaks { current: 0, best: 0 });
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let (_clock, store, engine) = engine();
        store.append(reps(5));

        let snapshot = engine.snapshot();
        store.append(reps(3));

        assert_eq!(snapshot.total_today(), 5);
        assert_eq!(engine.total_today(), 8);
    }

    #[test]
    fn test_snapshot_queries_agree() {
        let (clock, store, engine) = engine();
        store.append(reps(10));
        clock.advance(Duration::days(1));
        store.append(reps(4));
        store.append(reps(2));
        clock.advance(Duration::days(1));
        store.append(reps(7));

        let snapshot = engine.snapshot();
        let today = snapshot.today();
        assert_eq!(
            snapshot.total_today(),
            snapshot.daily_totals().get(&today).copied().unwrap_or(0)
        );
        assert_eq!(snapshot.total_today() + snapshot.total_before_today(), snapshot.total_all_time());
        assert!(snapshot.personal_record() >= snapshot.total_today());
        assert_eq!(snapshot.personal_record(), 10);
        assert_eq!(snapshot.streaks(), Streaks { current: 3, best: 3 });
        assert_eq!(snapshot.logs_today().len(), 1);
        assert_eq!(snapshot.goal_progress(15).remaining, 8);
    }

    #[test]
    fn test_engine_reads_store_clock() {
        let (clock, _store, engine) = engine();
        assert_eq!(engine.now(), clock.now());
        clock.advance(Duration::hours(3));
        assert_eq!(engine.now(), clock.now());
    }
}
