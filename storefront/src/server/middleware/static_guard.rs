//! Keeps the public file service away from the admin pages
//!
//! The gated `/admin` route only sees the literal prefix. Static files are
//! resolved after percent-decoding, so `/%61dmin/...`, `/admin%2F...` or
//! `//admin/...` would otherwise reach `PUBLIC_DIR/admin` without credentials.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};

use crate::security_log;

/// Directory under `PUBLIC_DIR` that only the admin route may serve
pub const ADMIN_DIR: &str = "admin";

/// Whether a request path resolves into [`ADMIN_DIR`] once decoded
pub fn targets_admin_dir(raw_path: &str) -> bool {
    let decoded = match urlencoding::decode(raw_path) {
        Ok(path) => path,
        // ServeDir refuses paths that are not valid UTF-8 after decoding
        Err(_) => return false,
    };
    decoded
        .split(['/', '\\'])
        .find(|segment| !segment.is_empty() && *segment != ".")
        .is_some_and(|first| first.eq_ignore_ascii_case(ADMIN_DIR))
}

/// Reply 404 for public-file requests that decode into the admin directory
pub async fn hide_admin_dir(req: Request, next: Next) -> Response {
    if targets_admin_dir(req.uri().path()) {
        security_log!("WARN", "admin_path_bypass", uri = req.uri().path());
        return AppError::with_message(ErrorCode::NotFound, "Route not found").into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_admin_paths_are_caught() {
        assert!(targets_admin_dir("/admin/index.html"));
        assert!(targets_admin_dir("/%61dmin/index.html"));
        assert!(targets_admin_dir("/admin%2Findex.html"));
        assert!(targets_admin_dir("//admin/index.html"));
        assert!(targets_admin_dir("/./ADMIN/index.html"));
        assert!(targets_admin_dir("/admin"));
    }

    #[test]
    fn test_other_paths_pass() {
        assert!(!targets_admin_dir("/"));
        assert!(!targets_admin_dir("/index.html"));
        assert!(!targets_admin_dir("/assets/admin.js"));
        assert!(!targets_admin_dir("/administrator.html"));
    }
}
