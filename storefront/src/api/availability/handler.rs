//! Availability API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::Availability;

use crate::availability::availability;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

/// Stock status for `?date=YYYY-MM-DD`
pub async fn get(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Availability>> {
    let date = query
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::required("date parameter"))?;

    let settings = state.settings.get().await;
    Ok(Json(availability(&settings, date.trim())))
}
