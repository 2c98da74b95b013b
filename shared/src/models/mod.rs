//! Data models
//!
//! Shared between the storefront service and its browser pages (via API).
//! Everything here is plain data plus pure helpers; no I/O.

pub mod availability;
pub mod order;
pub mod product;
pub mod settings;

// Re-exports
pub use availability::*;
pub use order::*;
pub use product::*;
pub use settings::*;
