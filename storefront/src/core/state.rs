//! Server state

use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::{OrderRepository, SettingsRepository};
use crate::events::OrderEvents;
use crate::export::{NoopExporter, OrderExporter, SheetsExporter};
use crate::notify::{MailApiNotifier, NoopNotifier, OrderNotifier};

/// Shared state, cloned into every handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub orders: OrderRepository,
    pub settings: SettingsRepository,
    pub events: OrderEvents,
}

impl ServerState {
    /// Open the data files and wire collaborators from `config`
    pub async fn initialize(config: &Config) -> Result<Self> {
        let events = build_events(config);
        Self::with_events(config.clone(), events).await
    }

    /// Open the data files with caller-supplied collaborators
    pub async fn with_events(config: Config, events: OrderEvents) -> Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let orders = OrderRepository::open(config.orders_path()).await?;
        let settings = SettingsRepository::open(config.settings_path()).await?;

        tracing::info!(data_dir = %config.data_dir.display(), "Data stores ready");

        Ok(Self {
            config: Arc::new(config),
            orders,
            settings,
            events,
        })
    }
}

fn build_events(config: &Config) -> OrderEvents {
    let notifier: Arc<dyn OrderNotifier> = match &config.mail {
        Some(mail) => {
            tracing::info!(api = %mail.api_url, "Mail notifications enabled");
            Arc::new(MailApiNotifier::new(mail.clone()))
        }
        None => {
            tracing::info!("Mail not configured (MAIL_API_URL / MAIL_API_KEY unset)");
            Arc::new(NoopNotifier)
        }
    };

    let exporter: Arc<dyn OrderExporter> = match &config.sheets {
        Some(sheets) => match SheetsExporter::from_config(sheets, config.business_timezone) {
            Ok(exporter) => {
                tracing::info!(sheet_id = %sheets.sheet_id, "Google Sheets export enabled");
                Arc::new(exporter)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Google Sheets export disabled");
                Arc::new(NoopExporter)
            }
        },
        None => {
            tracing::info!("Google Sheets not configured (GOOGLE_SHEET_ID unset)");
            Arc::new(NoopExporter)
        }
    };

    OrderEvents::new(notifier, exporter)
}
