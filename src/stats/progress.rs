//! Trend series for the progress chart

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::records::daily_totals;
use crate::types::{LogEntry, ProgressPoint, ProgressView};
use crate::utils::time::Calendar;

/// Most recent `limit` active buckets, ascending by date
///
/// Only days (or weeks) with entries appear; gaps are not zero-filled.
pub fn progress(
    entries: &[LogEntry],
    calendar: &Calendar,
    view: ProgressView,
    limit: usize,
) -> Vec<ProgressPoint> {
    let daily = daily_totals(entries, calendar);
    let buckets: BTreeMap<NaiveDate, u64> = match view {
        ProgressView::Daily => daily,
        ProgressView::Weekly => {
            let mut weekly = BTreeMap::new();
            for (date, reps) in daily {
                *weekly.entry(calendar.start_of_week(date)).or_insert(0) += reps;
            }
            weekly
        }
    };

    let skip = buckets.len().saturating_sub(limit);
    buckets
        .into_iter()
        .skip(skip)
        .map(|(date, reps)| ProgressPoint { date, reps })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn entry(id: u64, reps: u32, d: u32) -> LogEntry {
        let timestamp: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 10, d, 12, 0, 0).unwrap();
        LogEntry { id, reps, timestamp }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_daily_keeps_last_active_days() {
        let entries: Vec<LogEntry> = (1..=9).map(|d| entry(u64::from(d), d, d)).collect();

        let series = progress(&entries, &Calendar::utc(), ProgressView::Daily, 7);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0], ProgressPoint { date: date(3), reps: 3 });
        assert_eq!(series[6], ProgressPoint { date: date(9), reps: 9 });
    }

    #[test]
    fn test_weekly_buckets_by_week_start() {
        // Sundays: 4th, 11th
        let entries = vec![entry(1, 2, 5), entry(2, 3, 10), entry(3, 4, 11), entry(4, 1, 16)];

        let series = progress(&entries, &Calendar::utc(), ProgressView::Weekly, 4);
        assert_eq!(
            series,
            vec![
                ProgressPoint { date: date(4), reps: 5 },
                ProgressPoint { date: date(11), reps: 5 },
            ]
        );
    }

    #[test]
    fn test_empty_series() {
        assert!(progress(&[], &Calendar::utc(), ProgressView::Daily, 7).is_empty());
    }
}
