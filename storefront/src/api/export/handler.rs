//! Export API Handlers

use axum::extract::State;
use serde::Serialize;
use shared::error::ErrorCode;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Serialize)]
pub struct ExportResult {
    pub count: usize,
}

/// Append every stored order to the spreadsheet
pub async fn bulk_export(State(state): State<ServerState>) -> AppResult<ApiResponse<ExportResult>> {
    if !state.events.export_enabled() {
        return Err(AppError::invalid_request("Spreadsheet export is not configured"));
    }

    let orders = state.orders.list().await;
    let count = state.events.bulk_export(&orders).await.map_err(|e| {
        tracing::warn!(error = %e, "Bulk export failed");
        AppError::with_message(ErrorCode::NetworkError, "Export failed")
    })?;

    Ok(ApiResponse::success(ExportResult { count }))
}
