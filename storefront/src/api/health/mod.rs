//! Health check
//!
//! ```json
//! { "ok": true, "status": "ok", "version": "0.1.0" }
//! ```

use axum::{Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::ApiResponse;

/// Public route
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> ApiResponse<HealthResponse> {
    ApiResponse::success(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
