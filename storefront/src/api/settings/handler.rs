//! Settings API Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use shared::models::{PublicSettings, Settings, SettingsPatch};

use crate::api::json_body;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

#[derive(Serialize)]
pub struct SettingsUpdated {
    pub settings: Settings,
}

/// Contact, payment methods and Instagram link
pub async fn get_public(State(state): State<ServerState>) -> Json<PublicSettings> {
    Json(state.settings.public_view().await)
}

/// Full settings document
pub async fn get(State(state): State<ServerState>) -> Json<Settings> {
    Json(state.settings.get().await)
}

/// Merge a partial update
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<SettingsPatch>, JsonRejection>,
) -> AppResult<ApiResponse<SettingsUpdated>> {
    let patch = json_body(payload)?;
    let settings = state.settings.merge_update(patch).await?;
    Ok(ApiResponse::success(SettingsUpdated { settings }))
}
