//! Order notifications
//!
//! Invoked after an order is persisted. Failures are logged by the caller and
//! never reach the customer.

mod mail;

pub use mail::{MailApiNotifier, customer_confirmation, staff_notice};

use async_trait::async_trait;
use shared::models::{Order, Settings};

/// A rendered email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// Tell staff about a new order and confirm it to the customer
    async fn order_created(&self, order: &Order, settings: &Settings) -> anyhow::Result<()>;
}

/// Used when no mail service is configured
pub struct NoopNotifier;

#[async_trait]
impl OrderNotifier for NoopNotifier {
    async fn order_created(&self, order: &Order, _settings: &Settings) -> anyhow::Result<()> {
        tracing::debug!(order_id = %order.id, "Mail not configured, skipping notification");
        Ok(())
    }
}
