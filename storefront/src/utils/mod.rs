//! Utilities
//!
//! - [`AppError`] / [`ApiResponse`] - unified error types (from `shared::error`)
//! - [`logger`] - tracing setup
//! - [`validation`] - input checks shared by the stores and handlers

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
