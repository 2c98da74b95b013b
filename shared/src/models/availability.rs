//! Availability Model
//!
//! Stock is an admin-set status, not a counter. The remaining figures are
//! fixed placeholders that only drop to zero when a size is marked `out`.

use serde::{Deserialize, Serialize};

use super::settings::StockStatus;

pub const CAP_FULL: u32 = 30;
pub const CAP_HALF: u32 = 10;
pub const PLACEHOLDER_REMAINING_FULL: u32 = 20;
pub const PLACEHOLDER_REMAINING_HALF: u32 = 8;

/// Response of `GET /api/availability?date=`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Availability {
    pub cap_full: u32,
    pub cap_half: u32,
    pub remaining_full: u32,
    pub remaining_half: u32,
    pub status_full: StockStatus,
    pub status_half: StockStatus,
}
