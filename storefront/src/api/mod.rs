//! HTTP API routes
//!
//! # Layout
//!
//! - [`health`] - liveness check
//! - [`pickup_dates`] - the three offered pickup dates
//! - [`products`] - static catalog
//! - [`settings`] - public projection and admin merge-update
//! - [`availability`] - per-date stock status
//! - [`orders`] - order placement and admin order management
//! - [`export`] - bulk spreadsheet export (admin)
//!
//! Public routers are exposed as `router()`, admin routers as
//! `admin_router()`; the admin ones are mounted behind the Basic gate.

pub mod availability;
pub mod export;
pub mod health;
pub mod orders;
pub mod pickup_dates;
pub mod products;
pub mod settings;

use axum::Json;
use axum::extract::rejection::JsonRejection;

pub use crate::utils::{ApiResponse, AppError, AppResult};

/// Client-facing reason for every body decode failure
pub const INVALID_REQUEST_DATA: &str = "Invalid request data";

/// Unwrap a JSON body, turning decode failures into client errors
///
/// Well-formed JSON with the wrong shape (unknown size, flavor or status
/// value) is a validation error; syntax errors and a missing or wrong
/// content type are invalid requests. Both reply [`INVALID_REQUEST_DATA`];
/// the extractor's text is kept only as the `reason` detail.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::JsonDataError(e)) => {
            Err(AppError::validation(INVALID_REQUEST_DATA).with_detail("reason", e.body_text()))
        }
        Err(rejection) => Err(AppError::invalid_request(INVALID_REQUEST_DATA)
            .with_detail("reason", rejection.body_text())),
    }
}
