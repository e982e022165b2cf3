//! Time-windowed totals (today, this week, before today, all time)

use chrono::{DateTime, Duration, Utc};

use crate::types::{sum_reps, LogEntry};
use crate::utils::time::Calendar;

/// Half-open interval `[start, end)`; an open end runs forever
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| instant >= start) && self.end.map_or(true, |end| instant < end)
    }

    /// Entries inside the window, in their original order
    pub fn select(&self, entries: &[LogEntry]) -> Vec<LogEntry> {
        entries
            .iter()
            .filter(|e| self.contains(e.timestamp))
            .cloned()
            .collect()
    }

    pub fn total(&self, entries: &[LogEntry]) -> u64 {
        sum_reps(entries.iter().filter(|e| self.contains(e.timestamp)))
    }
}

/// `[startOfToday, startOfTomorrow)` in local time
pub fn today(calendar: &Calendar, now: DateTime<Utc>) -> TimeWindow {
    let today = calendar.local_date(now);
    TimeWindow {
        start: Some(calendar.start_of_day(today)),
        end: Some(calendar.start_of_day(today + Duration::days(1))),
    }
}

/// From local midnight of the week's first day, with no upper bound
pub fn this_week(calendar: &Calendar, now: DateTime<Utc>) -> TimeWindow {
    let week_start = calendar.start_of_week(calendar.local_date(now));
    TimeWindow {
        start: Some(calendar.start_of_day(week_start)),
        end: None,
    }
}

/// Everything before local midnight today
pub fn before_today(calendar: &Calendar, now: DateTime<Utc>) -> TimeWindow {
    TimeWindow {
        start: None,
        end: Some(calendar.start_of_day(calendar.local_date(now))),
    }
}

pub fn total_today(entries: &[LogEntry], calendar: &Calendar, now: DateTime<Utc>) -> u64 {
    today(calendar, now).total(entries)
}

pub fn total_this_week(entries: &[LogEntry], calendar: &Calendar, now: DateTime<Utc>) -> u64 {
    this_week(calendar, now).total(entries)
}

pub fn total_before_today(entries: &[LogEntry], calendar: &Calendar, now: DateTime<Utc>) -> u64 {
    before_today(calendar, now).total(entries)
}

pub fn total_all_time(entries: &[LogEntry]) -> u64 {
    sum_reps(entries)
}
