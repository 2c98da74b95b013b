//! Spreadsheet export
//!
//! Each new order becomes a row; status changes rewrite the row's status
//! cell. Export is best effort and never blocks an order.

mod sheets;

pub use sheets::{SheetsExporter, order_row};

use async_trait::async_trait;
use shared::models::{Order, OrderStatus};

/// Fields rewritten on an already exported row; `None` leaves a cell as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowUpdate {
    pub status: Option<OrderStatus>,
    pub payment_method: Option<String>,
    pub payment_received: Option<bool>,
}

impl RowUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.payment_method.is_none() && self.payment_received.is_none()
    }
}

#[async_trait]
pub trait OrderExporter: Send + Sync {
    /// Append one order
    async fn export_order(&self, order: &Order) -> anyhow::Result<()>;

    /// Rewrite cells of an already exported order
    async fn update_order(&self, order_id: &str, update: &RowUpdate) -> anyhow::Result<()>;

    /// Append every given order; returns the number of rows written
    async fn bulk_export(&self, orders: &[Order]) -> anyhow::Result<usize>;

    /// Whether a real export target is behind this exporter
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Used when no spreadsheet is configured
pub struct NoopExporter;

#[async_trait]
impl OrderExporter for NoopExporter {
    async fn export_order(&self, order: &Order) -> anyhow::Result<()> {
        tracing::debug!(order_id = %order.id, "Sheets not configured, skipping export");
        Ok(())
    }

    async fn update_order(&self, _order_id: &str, _update: &RowUpdate) -> anyhow::Result<()> {
        Ok(())
    }

    async fn bulk_export(&self, _orders: &[Order]) -> anyhow::Result<usize> {
        Ok(0)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
