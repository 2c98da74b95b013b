//! Availability API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Public route
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/availability", get(handler::get))
}
