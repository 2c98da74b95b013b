//! Data layer
//!
//! Flat JSON files under `DATA_DIR`. Each file is owned by exactly one
//! repository, which serializes every read-modify-write through its own lock.

pub mod json_file;
pub mod repository;

pub use repository::{OrderRepository, RepoError, RepoResult, SettingsRepository};

/// Orders file name inside the data directory
pub const ORDERS_FILE: &str = "orders.json";
/// Settings file name inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";
