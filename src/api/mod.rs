//! API module for HTTP and WebSocket endpoints
//!
//! This module provides the REST API and WebSocket live updates for the pull-up log.

pub mod http;
pub mod rest;
pub mod websocket;
