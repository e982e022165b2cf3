//! WebSocket module for live log updates
//!
//! Provides WebSocket endpoint at `/ws` that pushes every newly logged set to
//! connected clients, so dashboards refresh without polling.
//!
//! ## Features
//! - `entry_logged` event per append
//! - Sequence ID tracking for gap detection
//! - `lagged` notice when a slow client misses events

pub mod events;
pub mod handler;
pub mod state;
