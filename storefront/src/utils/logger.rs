//! Logging Infrastructure
//!
//! Structured logging for both development and production environments.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset
///
/// `security` carries the `security_log!` events and is always on at `info`.
pub fn default_directives(level: &str) -> String {
    format!("storefront={level},tower_http=info,security=info")
}

/// Build the filter: `RUST_LOG` wins, otherwise [`default_directives`]
pub fn env_filter(log_level: Option<&str>) -> EnvFilter {
    let level = log_level.unwrap_or("info");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Initialize the logger with optional JSON formatting and file output
///
/// File output is enabled only when `log_dir` already exists; logs roll daily.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "storefront");
            let subscriber = subscriber.with_writer(file_appender).with_ansi(false);
            let _ = if json {
                subscriber.json().try_init()
            } else {
                subscriber.try_init()
            };
            return;
        }
    }

    let _ = if json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    fn enabled_with(level: &str) -> (bool, bool, bool) {
        let subscriber =
            tracing_subscriber::registry().with(EnvFilter::new(default_directives(level)));
        tracing::subscriber::with_default(subscriber, || {
            (
                tracing::enabled!(target: "security", Level::INFO),
                tracing::enabled!(target: "storefront", Level::INFO),
                tracing::enabled!(target: "storefront", Level::DEBUG),
            )
        })
    }

    #[test]
    fn test_security_events_pass_default_filter() {
        assert_eq!(enabled_with("info"), (true, true, false));
    }

    #[test]
    fn test_security_events_survive_quiet_level() {
        let (security, storefront, _) = enabled_with("warn");
        assert!(security);
        assert!(!storefront);
    }
}
