//! Consecutive-day streaks

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{LogEntry, Streaks};
use crate::utils::time::Calendar;

/// Distinct local days with at least one entry
pub fn active_days(entries: &[LogEntry], calendar: &Calendar) -> BTreeSet<NaiveDate> {
    entries
        .iter()
        .map(|e| calendar.local_date(e.timestamp))
        .collect()
}

/// Days in a row ending at `today`; 0 when today itself is inactive
pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = today;
    while days.contains(&day) {
        count += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    count
}

/// Longest run of days that each follow the previous by exactly one day
pub fn best_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &day in days {
        run = match previous {
            Some(p) if (day - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }

    best
}

pub fn streaks(entries: &[LogEntry], calendar: &Calendar, now: DateTime<Utc>) -> Streaks {
    let days = active_days(entries, calendar);
    Streaks {
        current: current_streak(&days, calendar.local_date(now)),
        best: best_streak(&days),
    }
}
