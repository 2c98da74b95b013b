//! HTTP middleware

mod logging;
mod static_guard;

pub use logging::logging_middleware;
pub use static_guard::{ADMIN_DIR, hide_admin_dir};
