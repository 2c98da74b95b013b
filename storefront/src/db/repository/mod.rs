//! Repository Module
//!
//! Owned, mutex-guarded stores over the JSON data files.

pub mod order;
pub mod settings;

pub use order::OrderRepository;
pub use settings::SettingsRepository;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Validation(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Pickup date {0} is not available")]
    PickupDateUnavailable(String),

    #[error("{0}")]
    InvalidSettings(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::EmptyCart => AppError::new(ErrorCode::OrderEmpty),
            RepoError::PickupDateUnavailable(date) => {
                AppError::new(ErrorCode::PickupDateUnavailable).with_detail("pickup_date", date)
            }
            RepoError::InvalidSettings(msg) => AppError::with_message(ErrorCode::SettingsInvalid, msg),
            RepoError::NotFound(id) => AppError::new(ErrorCode::OrderNotFound).with_detail("id", id),
            RepoError::InvalidStatus(status) => {
                AppError::new(ErrorCode::InvalidOrderStatus).with_detail("status", status)
            }
            RepoError::Persistence(msg) => {
                tracing::error!(error = %msg, "Data file write failed");
                AppError::storage(ErrorCode::StorageError.message())
            }
            RepoError::Serialization(msg) => {
                tracing::error!(error = %msg, "Data file encode/decode failed");
                AppError::new(ErrorCode::StorageCorrupted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_repo_error_maps_to_api_error() {
        let err: AppError = RepoError::Validation("Invalid email address".into()).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid email address");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err: AppError = RepoError::EmptyCart.into();
        assert_eq!(err.message, "Cart is empty");

        let err: AppError = RepoError::NotFound("ORD-ZZZZZZ".into()).into();
        assert_eq!(err.message, "Order not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err: AppError = RepoError::InvalidStatus("bogus".into()).into();
        assert_eq!(err.message, "Invalid status");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err: AppError = RepoError::Persistence("disk full".into()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
