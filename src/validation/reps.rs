//! Rep count validation

use serde_json::Value;

use crate::error::{TrackerError, TrackerResult};
use crate::types::Reps;

/// Largest rep count a single entry can hold
pub const MAX_REPS: u64 = u32::MAX as u64;

/// Validate the raw `reps` field of a log request
///
/// Accepts JSON integers (and floats with no fractional part, e.g. `5.0`).
/// Missing, null, strings, fractions, zero and negatives are rejected.
pub fn parse_reps(raw: Option<&Value>) -> TrackerResult<Reps> {
    let value = match raw {
        None | Some(Value::Null) => return Err(TrackerError::validation("reps is required")),
        Some(value) => value,
    };

    let Value::Number(number) = value else {
        return Err(TrackerError::validation(format!(
            "reps must be an integer, got {}",
            value
        )));
    };

    let reps = if let Some(n) = number.as_u64() {
        n
    } else if let Some(n) = number.as_i64() {
        return Err(TrackerError::validation(format!(
            "reps must be positive, got {}",
            n
        )));
    } else {
        match number.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= MAX_REPS as f64 => {
                f as u64
            }
            Some(f) if f.is_finite() && f.fract() == 0.0 && f < 0.0 => {
                return Err(TrackerError::validation(format!(
                    "reps must be positive, got {}",
                    f
                )));
            }
            _ => {
                return Err(TrackerError::validation(format!(
                    "reps must be an integer, got {}",
                    number
                )));
            }
        }
    };

    if reps > MAX_REPS {
        return Err(TrackerError::validation(format!(
            "reps must be at most {}",
            MAX_REPS
        )));
    }

    Reps::new(reps as u32)
}
