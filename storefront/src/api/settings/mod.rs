//! Settings API Module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/settings | GET | - |
//! | /api/admin/settings | GET, PUT | Basic |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Public route
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/settings", get(handler::get_public))
}

/// Admin routes
pub fn admin_router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/settings",
        get(handler::get).put(handler::update),
    )
}
