//! Plain-text export of the log
//!
//! The report is handed verbatim to the coaching collaborator, so its layout
//! is fixed:
//!
//! ```text
//! Project: Personal Fitness
//! Date: 2026-10-16
//! Pull-up Log:
//! - 09:00 AM → 3 reps
//! - 02:30 PM → 2 reps
//! Total: 5 reps
//! ```

use std::fmt::Write;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::types::{sum_reps, LogEntry};
use crate::utils::time::Calendar;

/// How entry times are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockStyle {
    /// `02:30 PM`
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// `14:30`
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl ClockStyle {
    fn pattern(self) -> &'static str {
        match self {
            ClockStyle::TwelveHour => "%I:%M %p",
            ClockStyle::TwentyFourHour => "%H:%M",
        }
    }

    pub fn format_time(self, time: NaiveTime) -> String {
        time.format(self.pattern()).to_string()
    }
}

impl FromStr for ClockStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "12h" | "12" => Ok(ClockStyle::TwelveHour),
            "24h" | "24" => Ok(ClockStyle::TwentyFourHour),
            other => Err(format!("unknown clock style '{}', expected 12h or 24h", other)),
        }
    }
}

/// Renders entries as the coaching report
#[derive(Debug, Clone)]
pub struct ExportFormatter {
    calendar: Calendar,
    clock_style: ClockStyle,
    project: String,
    activity: String,
}

impl ExportFormatter {
    pub fn new(calendar: Calendar, clock_style: ClockStyle) -> Self {
        Self {
            calendar,
            clock_style,
            project: "Personal Fitness".to_string(),
            activity: "Pull-up".to_string(),
        }
    }

    pub fn clock_style(&self) -> ClockStyle {
        self.clock_style
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Format `entries` in the order given; the slice is never reordered
    pub fn format(&self, entries: &[LogEntry], today: NaiveDate) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "Project: {}", self.project);
        let _ = writeln!(out, "Date: {}", today.format("%Y-%m-%d"));
        let _ = writeln!(out, "{} Log:", self.activity);

        for entry in entries {
            let time = self
                .clock_style
                .format_time(self.calendar.local_time(entry.timestamp));
            let _ = writeln!(out, "- {} → {} reps", time, entry.reps);
        }

        let _ = write!(out, "Total: {} reps", sum_reps(entries));
        out
    }

    /// Copy of `entries` sorted oldest first, for a report that reads top to bottom
    pub fn chronological(entries: &[LogEntry]) -> Vec<LogEntry> {
        let mut sorted = entries.to_vec();
        sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        sorted
    }
}
