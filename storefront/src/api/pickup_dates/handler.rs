//! Pickup Dates API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::pickup::{allowed_pickup_dates_iso, today_in};

/// `["YYYY-MM-DD", "YYYY-MM-DD", "YYYY-MM-DD"]` (Fri, Sat, Sun)
pub async fn list(State(state): State<ServerState>) -> Json<Vec<String>> {
    let today = today_in(state.config.business_timezone);
    Json(allowed_pickup_dates_iso(today))
}
