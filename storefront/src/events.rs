//! Post-persist side effects
//!
//! Handlers call into [`OrderEvents`] only after the store has accepted a
//! change. Work runs on spawned tasks; failures are logged and dropped.

use std::sync::Arc;

use shared::models::{Order, Settings};
use tokio::task::JoinHandle;

use crate::export::{NoopExporter, OrderExporter, RowUpdate};
use crate::notify::{NoopNotifier, OrderNotifier};

#[derive(Clone)]
pub struct OrderEvents {
    notifier: Arc<dyn OrderNotifier>,
    exporter: Arc<dyn OrderExporter>,
}

impl OrderEvents {
    pub fn new(notifier: Arc<dyn OrderNotifier>, exporter: Arc<dyn OrderExporter>) -> Self {
        Self { notifier, exporter }
    }

    /// No mail, no export
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopNotifier), Arc::new(NoopExporter))
    }

    /// Notify and export a freshly persisted order
    pub fn order_created(&self, order: Order, settings: Settings) -> JoinHandle<()> {
        let notifier = self.notifier.clone();
        let exporter = self.exporter.clone();
        tokio::spawn(async move {
            let (notified, exported) = tokio::join!(
                notifier.order_created(&order, &settings),
                exporter.export_order(&order)
            );
            if let Err(e) = notified {
                tracing::warn!(order_id = %order.id, error = %e, "Order notification failed");
            }
            if let Err(e) = exported {
                tracing::warn!(order_id = %order.id, error = %e, "Order export failed");
            }
        })
    }

    /// Mirror a status (and optional payment) change to the export target
    pub fn order_updated(&self, order_id: String, update: RowUpdate) -> JoinHandle<()> {
        let exporter = self.exporter.clone();
        tokio::spawn(async move {
            if let Err(e) = exporter.update_order(&order_id, &update).await {
                tracing::warn!(order_id = %order_id, error = %e, "Export row update failed");
            }
        })
    }

    pub fn export_enabled(&self) -> bool {
        self.exporter.is_enabled()
    }

    /// Export every order now; awaited by the caller
    pub async fn bulk_export(&self, orders: &[Order]) -> anyhow::Result<usize> {
        self.exporter.bulk_export(orders).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use shared::models::OrderStatus;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        notified: AtomicUsize,
        exported: AtomicUsize,
        updates: Mutex<Vec<RowUpdate>>,
    }

    #[async_trait]
    impl OrderNotifier for Counting {
        async fn order_created(&self, _order: &Order, _settings: &Settings) -> anyhow::Result<()> {
            self.notified.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("mail down")
        }
    }

    #[async_trait]
    impl OrderExporter for Counting {
        async fn export_order(&self, _order: &Order) -> anyhow::Result<()> {
            self.exported.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn update_order(&self, _id: &str, update: &RowUpdate) -> anyhow::Result<()> {
            self.updates.lock().unwrap().push(update.clone());
            Ok(())
        }

        async fn bulk_export(&self, orders: &[Order]) -> anyhow::Result<usize> {
            Ok(orders.len())
        }
    }

    fn order() -> Order {
        Order {
            id: "ORD-AAAAAA".into(),
            created_at: Utc::now(),
            status: OrderStatus::New,
            total_cents: 5000,
            customer_name: "Pat".into(),
            email: "pat@example.com".into(),
            phone: "555-0100".into(),
            pickup_date: "2026-11-13".into(),
            items: vec![],
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let counting = Arc::new(Counting::default());
        let events = OrderEvents::new(counting.clone(), counting.clone());

        events
            .order_created(order(), Settings::default())
            .await
            .unwrap();
        let update = RowUpdate {
            status: Some(OrderStatus::Ready),
            payment_received: Some(true),
            ..Default::default()
        };
        events
            .order_updated("ORD-AAAAAA".into(), update.clone())
            .await
            .unwrap();

        assert_eq!(counting.notified.load(Ordering::SeqCst), 1);
        assert_eq!(counting.exported.load(Ordering::SeqCst), 1);
        assert_eq!(*counting.updates.lock().unwrap(), vec![update]);
        assert!(events.export_enabled());
        assert_eq!(events.bulk_export(&[order(), order()]).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_disabled_exporter() {
        let events = OrderEvents::disabled();
        assert!(!events.export_enabled());
        assert_eq!(events.bulk_export(&[order()]).await.unwrap(), 0);
    }
}
