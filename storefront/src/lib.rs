//! Storefront - turkey pre-order service
//!
//! # Architecture
//!
//! - **Stores** (`db`): orders and site settings as JSON files on disk,
//!   each guarded by a single-writer mutex
//! - **Pickup rule** (`pickup`): the three dates customers may choose
//! - **Availability** (`availability`): per-date stock status from settings
//! - **Auth** (`auth`): HTTP Basic gate in front of the admin surface
//! - **Collaborators** (`notify`, `export`): mail and spreadsheet adapters
//!   fired after an order is persisted
//! - **HTTP API** (`api`, `server`): axum routes and middleware
//!
//! # Layout
//!
//! ```text
//! storefront/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── auth/          # Basic auth gate
//! ├── db/            # JSON file stores
//! ├── notify/        # order mail
//! ├── export/        # spreadsheet export
//! ├── server/        # router assembly, middleware
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod availability;
pub mod core;
pub mod db;
pub mod events;
pub mod export;
pub mod notify;
pub mod pickup;
pub mod server;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use server::build_app;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
  __  __ _____ _____ _____
 |  \/  | ____| ____|  ___|
 | |\/| |  _| |  _| | |_
 | |  | | |___| |___|  _|
 |_|  |_|_____|_____|_|
   turkey pre-orders
    "#
    );
}
