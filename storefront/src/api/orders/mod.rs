//! Orders API Module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | POST | - |
//! | /api/admin/orders | GET (`?status=`) | Basic |
//! | /api/admin/orders/{id} | GET | Basic |
//! | /api/admin/orders/{id}/status | PUT | Basic |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Public route
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders", post(handler::create))
}

/// Admin routes
pub fn admin_router() -> Router<ServerState> {
    Router::new().nest("/api/admin/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
}
