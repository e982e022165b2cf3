//! Clock and calendar utilities
//!
//! Every day boundary in the tracker is computed through a [`Calendar`]: a
//! [`Zone`] plus the weekday a week starts on. The host's zone is only used
//! when configured as `local`, and then its offset is looked up per instant.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
    Weekday,
};
use chrono_tz::Tz;
use parking_lot::Mutex;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to (tests, seeding)
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }

    /// Move forward (or backward, with a negative duration)
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Time zone days are read in
///
/// Named and host zones resolve their offset per instant, so they follow DST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
    /// The host's zone, consulted on every conversion
    Local,
}

impl From<FixedOffset> for Zone {
    fn from(offset: FixedOffset) -> Self {
        Zone::Fixed(offset)
    }
}

impl From<Tz> for Zone {
    fn from(tz: Tz) -> Self {
        Zone::Named(tz)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Fixed(offset) => write!(f, "{}", offset),
            Zone::Named(tz) => f.write_str(tz.name()),
            Zone::Local => f.write_str("local"),
        }
    }
}

impl FromStr for Zone {
    type Err = String;

    /// `local`, a UTC offset (see [`parse_utc_offset`]) or an IANA name
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        if let Some(offset) = parse_utc_offset(raw) {
            return Ok(Zone::Fixed(offset));
        }
        raw.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| format!("unknown time zone '{}', expected 'local', ±HH:MM or an IANA name", raw))
    }
}

/// Local-date arithmetic for a time zone and week convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    zone: Zone,
    week_start: Weekday,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    pub fn new(zone: impl Into<Zone>, week_start: Weekday) -> Self {
        Self {
            zone: zone.into(),
            week_start,
        }
    }

    /// UTC days, weeks starting on Sunday
    pub fn utc() -> Self {
        Self::new(Utc.fix(), Weekday::Sun)
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    fn local_datetime(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self.zone {
            Zone::Fixed(offset) => instant.with_timezone(&offset).naive_local(),
            Zone::Named(tz) => instant.with_timezone(&tz).naive_local(),
            Zone::Local => instant.with_timezone(&Local).naive_local(),
        }
    }

    /// Calendar day an instant falls on
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local_datetime(instant).date()
    }

    /// Wall-clock time of an instant
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveTime {
        self.local_datetime(instant).time()
    }

    /// Local midnight opening `date`, as an instant
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        match self.zone {
            Zone::Fixed(offset) => first_instant_at(&offset, midnight),
            Zone::Named(tz) => first_instant_at(&tz, midnight),
            Zone::Local => first_instant_at(&Local, midnight),
        }
    }

    /// Most recent day on or before `date` that opens a week
    pub fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        let today = date.weekday().num_days_from_sunday();
        let first = self.week_start.num_days_from_sunday();
        let back = (7 + today - first) % 7;
        date - Duration::days(i64::from(back))
    }

    /// `YYYY-MM-DD` key of the day an instant falls on
    pub fn day_key(&self, instant: DateTime<Utc>) -> String {
        self.local_date(instant).format("%Y-%m-%d").to_string()
    }
}

// Offset transitions fall on quarter hours
const GAP_STEP_MINUTES: i64 = 15;
const MAX_GAP_STEPS: i64 = 24 * 4;

/// Earliest instant showing wall time `wall` (or later) in `tz`
///
/// A repeated wall time resolves to its first occurrence; one skipped by a DST
/// gap moves forward to the end of the gap.
fn first_instant_at<Z: TimeZone>(tz: &Z, wall: NaiveDateTime) -> DateTime<Utc> {
    (0..=MAX_GAP_STEPS)
        .find_map(|step| {
            tz.from_local_datetime(&(wall + Duration::minutes(step * GAP_STEP_MINUTES)))
                .earliest()
        })
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&wall))
}

/// Parse `Z`, `UTC`, `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_york() -> Calendar {
        Calendar::new(chrono_tz::America::New_York, Weekday::Sun)
    }

    #[test]
    fn test_local_date_follows_offset() {
        let tokyo = Calendar::new(FixedOffset::east_opt(9 * 3600).unwrap(), Weekday::Sun);
        let instant = utc(2026, 10, 15, 20, 0);

        assert_eq!(Calendar::utc().local_date(instant), date(2026, 10, 15));
        assert_eq!(tokyo.local_date(instant), date(2026, 10, 16));
    }

    #[test]
    fn test_start_of_day_is_local_midnight() {
        let fixed = Calendar::new(FixedOffset::west_opt(4 * 3600).unwrap(), Weekday::Sun);
        let start = fixed.start_of_day(date(2026, 10, 16));

        assert_eq!(start, utc(2026, 10, 16, 4, 0));
        assert_eq!(fixed.local_date(start), date(2026, 10, 16));
        assert_eq!(
            fixed.local_date(start - Duration::milliseconds(1)),
            date(2026, 10, 15)
        );
    }

    #[test]
    fn test_named_zone_follows_dst() {
        let cal = new_york();

        // EDT (-04:00) in October, EST (-05:00) in December
        assert_eq!(cal.start_of_day(date(2026, 10, 16)), utc(2026, 10, 16, 4, 0));
        assert_eq!(cal.start_of_day(date(2026, 12, 1)), utc(2026, 12, 1, 5, 0));

        // 23:30 EST on Nov 30
        let late = utc(2026, 12, 1, 4, 30);
        assert_eq!(cal.local_date(late), date(2026, 11, 30));
        assert_eq!(cal.local_time(late), NaiveTime::from_hms_opt(23, 30, 0).unwrap());
    }

    #[test]
    fn test_days_around_transitions() {
        let cal = new_york();

        // 2026-03-08 springs forward at 02:00, 2026-11-01 falls back at 02:00
        assert_eq!(cal.start_of_day(date(2026, 3, 8)), utc(2026, 3, 8, 5, 0));
        assert_eq!(cal.start_of_day(date(2026, 3, 9)), utc(2026, 3, 9, 4, 0));
        assert_eq!(cal.start_of_day(date(2026, 11, 1)), utc(2026, 11, 1, 4, 0));
        assert_eq!(cal.start_of_day(date(2026, 11, 2)), utc(2026, 11, 2, 5, 0));
    }

    #[test]
    fn test_day_starts_where_previous_day_ends() {
        // Santiago moves its clocks at local midnight
        let cal = Calendar::new(chrono_tz::America::Santiago, Weekday::Sun);

        let mut day = date(2026, 1, 1);
        while day < date(2027, 1, 1) {
            let start = cal.start_of_day(day);
            assert_eq!(cal.local_date(start), day, "{}", day);
            assert_eq!(cal.local_date(start - Duration::seconds(1)), day.pred_opt().unwrap());
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_start_of_week_sunday() {
        let cal = Calendar::utc();
        // 2026-10-16 is a Friday
        assert_eq!(cal.start_of_week(date(2026, 10, 16)), date(2026, 10, 11));
        assert_eq!(cal.start_of_week(date(2026, 10, 11)), date(2026, 10, 11));
        assert_eq!(cal.start_of_week(date(2026, 10, 10)), date(2026, 10, 4));
    }

    #[test]
    fn test_start_of_week_monday() {
        let cal = Calendar::new(Utc.fix(), Weekday::Mon);
        assert_eq!(cal.start_of_week(date(2026, 10, 16)), date(2026, 10, 12));
        assert_eq!(cal.start_of_week(date(2026, 10, 11)), date(2026, 10, 5));
    }

    #[test]
    fn test_day_key_format() {
        assert_eq!(Calendar::utc().day_key(utc(2026, 3, 7, 23, 59)), "2026-03-07");
    }

    #[test]
    fn test_zone_from_str() {
        assert_eq!("local".parse::<Zone>(), Ok(Zone::Local));
        assert_eq!("UTC".parse::<Zone>(), Ok(Zone::Fixed(Utc.fix())));
        assert_eq!(
            "+09:00".parse::<Zone>(),
            Ok(Zone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap()))
        );
        assert_eq!(
            "America/New_York".parse::<Zone>(),
            Ok(Zone::Named(chrono_tz::America::New_York))
        );
        assert!("Mars/Olympus".parse::<Zone>().is_err());
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("Z"), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("utc"), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("+05:30"), FixedOffset::east_opt(5 * 3600 + 1800));
        assert_eq!(parse_utc_offset("-0800"), FixedOffset::west_opt(8 * 3600));
        assert_eq!(parse_utc_offset("+02"), FixedOffset::east_opt(2 * 3600));
        assert_eq!(parse_utc_offset("05:30"), None);
        assert_eq!(parse_utc_offset("+25:00"), None);
        assert_eq!(parse_utc_offset("+ab:cd"), None);
    }

    #[test]
    fn test_manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(utc(2026, 10, 16, 9, 0));
        assert_eq!(clock.now(), utc(2026, 10, 16, 9, 0));

        clock.advance(Duration::hours(5) + Duration::minutes(30));
        assert_eq!(clock.now(), utc(2026, 10, 16, 14, 30));

        clock.set(utc(2026, 1, 1, 0, 0));
        assert_eq!(clock.now(), utc(2026, 1, 1, 0, 0));
    }
}
