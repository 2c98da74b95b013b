//! Admin authentication
//!
//! Stateless HTTP Basic check: every admin request carries the credentials.
//! No sessions, lockout or rate limiting.

mod middleware;

pub use middleware::{AuthRejection, require_admin};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// The only accepted user name
pub const ADMIN_USERNAME: &str = "admin";

/// `WWW-Authenticate` challenge sent with every 401
pub const BASIC_REALM: &str = r#"Basic realm="MEEF Admin""#;

/// Decoded `Authorization: Basic ...` credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse an `Authorization` header value. `None` if it is not well-formed Basic.
    pub fn from_header(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Whether these are the admin credentials for `admin_password`
    pub fn is_admin(&self, admin_password: &str) -> bool {
        self.username == ADMIN_USERNAME && self.password == admin_password
    }

    /// Header value for these credentials (used by tests and tooling)
    pub fn to_header(&self) -> String {
        format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", self.username, self.password))
        )
    }
}
