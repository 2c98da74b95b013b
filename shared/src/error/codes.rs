//! Unified error codes for the storefront
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 6xxx: Settings / stock errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so the browser scripts can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Admin credentials missing or wrong
    NotAuthenticated = 1001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Status outside the closed status set
    InvalidOrderStatus = 4002,
    /// Order has no items
    OrderEmpty = 4007,
    /// Pickup date is not one of the currently offered dates
    PickupDateUnavailable = 4008,

    // ==================== 6xxx: Settings ====================
    /// Settings patch rejected
    SettingsInvalid = 6001,

    // ==================== 9xxx: System ====================
    /// Writing a data file failed
    StorageError = 9002,
    /// Outbound collaborator (mail, sheets) failed
    NetworkError = 9003,
    /// Data file could not be parsed
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required.",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidOrderStatus => "Invalid status",
            ErrorCode::OrderEmpty => "Cart is empty",
            ErrorCode::PickupDateUnavailable => "Pickup date is not available",

            // Settings
            ErrorCode::SettingsInvalid => "Invalid settings",

            // System
            ErrorCode::StorageError => "Failed to save data",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidOrderStatus),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::PickupDateUnavailable),

            // Settings
            6001 => Ok(ErrorCode::SettingsInvalid),

            // System
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::NetworkError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::InvalidOrderStatus.code(), 4002);
        assert_eq!(ErrorCode::StorageError.code(), 9002);
    }

    #[test]
    fn test_try_from_roundtrips_every_code() {
        let all = [
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::InvalidRequest,
            ErrorCode::RequiredField,
            ErrorCode::NotAuthenticated,
            ErrorCode::OrderNotFound,
            ErrorCode::InvalidOrderStatus,
            ErrorCode::OrderEmpty,
            ErrorCode::PickupDateUnavailable,
            ErrorCode::SettingsInvalid,
            ErrorCode::StorageError,
            ErrorCode::NetworkError,
            ErrorCode::StorageCorrupted,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_uses_numeric_form() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let code: ErrorCode = serde_json::from_str("1001").unwrap();
        assert_eq!(code, ErrorCode::NotAuthenticated);
    }
}
