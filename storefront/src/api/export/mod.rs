//! Export API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Admin route
pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/admin/export", post(handler::bulk_export))
}
