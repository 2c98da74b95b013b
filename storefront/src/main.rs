//! storefront - turkey pre-order service
//!
//! Serves the public order pages and API, the password-protected admin
//! pages and API, and keeps orders and settings as JSON files on disk.

use storefront::{Config, Server, init_logger_with_file, print_banner};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );

    print_banner();
    tracing::info!(
        environment = %config.environment,
        data_dir = %config.data_dir.display(),
        public_dir = %config.public_dir.display(),
        timezone = %config.business_timezone,
        strict_pickup_dates = config.strict_pickup_dates,
        "Starting storefront"
    );

    Server::new(config).run().await?;

    Ok(())
}
