//! Request validation
//!
//! Raw input is checked here, before anything touches the store.

mod reps;

pub use reps::{parse_reps, MAX_REPS};
