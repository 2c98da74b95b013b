//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | ENVIRONMENT | development | development / staging / production |
//! | HTTP_PORT (or PORT) | 3000 | HTTP port |
//! | DATA_DIR | data | holds `orders.json` and `settings.json` |
//! | PUBLIC_DIR | public | static pages; `admin/` is password protected |
//! | ADMIN_PASSWORD | `meefadmin` in development | admin Basic Auth password |
//! | BUSINESS_TIMEZONE | America/Chicago | zone used for "today" |
//! | STRICT_PICKUP_DATES | false | reject pickup dates outside the offered three |
//! | LOG_LEVEL | info | fallback filter when RUST_LOG is unset |
//! | LOG_FORMAT | text | `json` for structured output |
//! | LOG_DIR | - | daily rolling log files when the directory exists |
//! | MAIL_API_URL, MAIL_API_KEY, MAIL_FROM | - | order notification mail |
//! | GOOGLE_SHEET_ID, GOOGLE_CREDENTIALS_PATH, GOOGLE_SHEET_RANGE | - | spreadsheet export |

use std::path::PathBuf;

use chrono_tz::Tz;
use thiserror::Error;

const DEV_ADMIN_PASSWORD: &str = "meefadmin";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in {1} environment")]
    MissingSecret(String, String),

    #[error("{0} must not be empty in {1} environment")]
    EmptySecret(String, String),

    #[error("invalid time zone: {0}")]
    InvalidTimezone(String),
}

/// Mail API credentials (JSON POST with bearer key)
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

/// Google Sheets export target
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub sheet_id: String,
    pub credentials_path: PathBuf,
    /// A1 range rows are appended to, e.g. `Sheet1!A:K`
    pub range: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub http_port: u16,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub admin_password: String,
    pub business_timezone: Tz,
    pub strict_pickup_dates: bool,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// `None` disables notification mail
    pub mail: Option<MailConfig>,
    /// `None` disables spreadsheet export
    pub sheets: Option<SheetsConfig>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(
        name: &str,
        environment: &str,
        dev_fallback: &str,
    ) -> Result<String, ConfigError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ConfigError::MissingSecret(name.into(), environment.into()));
                }
                dev_fallback.to_string()
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ConfigError::EmptySecret(name.into(), environment.into()));
        }
        Ok(val)
    }

    fn non_empty(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let tz_name =
            std::env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| "America/Chicago".into());
        let business_timezone: Tz = tz_name
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(tz_name.clone()))?;

        let mail = match (Self::non_empty("MAIL_API_URL"), Self::non_empty("MAIL_API_KEY")) {
            (Some(api_url), Some(api_key)) => Some(MailConfig {
                api_url,
                api_key,
                from: std::env::var("MAIL_FROM")
                    .unwrap_or_else(|_| "MEEF Meats <orders@meefmeats.com>".into()),
            }),
            _ => None,
        };

        let sheets = Self::non_empty("GOOGLE_SHEET_ID").map(|sheet_id| SheetsConfig {
            sheet_id,
            credentials_path: std::env::var("GOOGLE_CREDENTIALS_PATH")
                .unwrap_or_else(|_| "./google-credentials.json".into())
                .into(),
            range: std::env::var("GOOGLE_SHEET_RANGE").unwrap_or_else(|_| "Sheet1!A:K".into()),
        });

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".into())
                .into(),
            public_dir: std::env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| "public".into())
                .into(),
            admin_password: Self::require_secret("ADMIN_PASSWORD", &environment, DEV_ADMIN_PASSWORD)?,
            business_timezone,
            strict_pickup_dates: std::env::var("STRICT_PICKUP_DATES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")),
            log_dir: Self::non_empty("LOG_DIR"),
            mail,
            sheets,
            environment,
        })
    }

    /// Development defaults rooted at the given directories
    ///
    /// Used by tests; reads no environment variables.
    pub fn with_overrides(
        data_dir: impl Into<PathBuf>,
        public_dir: impl Into<PathBuf>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            environment: "development".into(),
            http_port: 3000,
            data_dir: data_dir.into(),
            public_dir: public_dir.into(),
            admin_password: admin_password.into(),
            business_timezone: chrono_tz::America::Chicago,
            strict_pickup_dates: false,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            mail: None,
            sheets: None,
        }
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(crate::db::ORDERS_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(crate::db::SETTINGS_FILE)
    }
}
