//! Utility functions and helpers
//!
//! This module contains the injectable clock and calendar arithmetic.

pub mod time;

pub use time::{parse_utc_offset, Calendar, Clock, ManualClock, SystemClock, Zone};
