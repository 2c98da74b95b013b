//! Shared types for the turkey storefront
//!
//! Wire/data models and the unified error system used by the HTTP service.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
