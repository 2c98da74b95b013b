//! Router assembly
//!
//! Public API, admin API behind the Basic gate, static pages, and the
//! tower-http middleware stack.

pub mod middleware;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{MethodRouter, any},
};
use http::{HeaderName, HeaderValue};
use shared::error::ErrorCode;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::auth::require_admin;
use crate::core::ServerState;
use crate::utils::AppError;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Public API routes
fn public_router() -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::pickup_dates::router())
        .merge(api::products::router())
        .merge(api::settings::router())
        .merge(api::availability::router())
        .merge(api::orders::router())
}

/// Admin API routes plus the admin pages, all behind the Basic gate
fn admin_router(state: &ServerState) -> Router<ServerState> {
    let admin_pages = ServeDir::new(state.config.public_dir.join(middleware::ADMIN_DIR))
        .not_found_service(not_found_service());

    Router::new()
        .merge(api::orders::admin_router())
        .merge(api::settings::admin_router())
        .merge(api::export::admin_router())
        .nest_service("/admin", admin_pages)
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_admin))
}

/// `{ ok: false, error: "Route not found" }`
async fn route_not_found() -> AppError {
    AppError::with_message(ErrorCode::NotFound, "Route not found")
}

fn not_found_service() -> MethodRouter {
    any(route_not_found)
}

/// Build the fully configured application
///
/// Used by the HTTP server and by router-level tests.
pub fn build_app(state: &ServerState) -> Router {
    // The admin directory is only served by the gated `/admin` route
    let public_files: Router = Router::new()
        .fallback_service(
            ServeDir::new(&state.config.public_dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(not_found_service()),
        )
        .layer(axum_middleware::from_fn(middleware::hide_admin_dir));

    public_router()
        .merge(admin_router(state))
        .fallback_service(public_files)
        // ========== Tower HTTP Middleware ==========
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        // Request ID - generate, then copy onto the response
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state.clone())
}
