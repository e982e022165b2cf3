//! Per-day totals and the personal record

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::LogEntry;
use crate::utils::time::Calendar;

/// Sum of reps per local calendar day, ascending by date
pub fn daily_totals(entries: &[LogEntry], calendar: &Calendar) -> BTreeMap<NaiveDate, u64> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(calendar.local_date(entry.timestamp)).or_insert(0) += u64::from(entry.reps);
    }
    totals
}

/// Best single-day total; 0 for an empty log
pub fn personal_record(entries: &[LogEntry], calendar: &Calendar) -> u64 {
    daily_totals(entries, calendar)
        .into_values()
        .max()
        .unwrap_or(0)
}
