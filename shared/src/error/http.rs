//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::OrderNotFound => StatusCode::NOT_FOUND,

            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::InvalidOrderStatus
            | Self::OrderEmpty
            | Self::PickupDateUnavailable
            | Self::SettingsInvalid => StatusCode::BAD_REQUEST,

            Self::NetworkError => StatusCode::BAD_GATEWAY,

            Self::StorageError | Self::StorageCorrupted => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
