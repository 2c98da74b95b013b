//! Order Repository
//!
//! All orders live in memory as the authoritative copy and are mirrored to
//! `orders.json` (a JSON array) after every mutation. The mutex is held across
//! the whole read-modify-write including the file install, so concurrent
//! requests cannot lose each other's updates.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use shared::models::{Order, OrderDraft, OrderStatus, order_total_cents};
use tokio::sync::Mutex;

use super::{RepoError, RepoResult};
use crate::db::json_file::{read_json, write_json_atomic};
use crate::utils::validation::validate_order_draft;

const ID_PREFIX: &str = "ORD-";
const ID_LEN: usize = 6;
const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Clone)]
pub struct OrderRepository {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    orders: Mutex<Vec<Order>>,
}

impl OrderRepository {
    /// Load the store from `path`, creating an empty file if none exists.
    ///
    /// A file that exists but cannot be parsed is an error; it is never
    /// silently replaced.
    pub async fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let path = path.into();
        let orders = match read_json::<Vec<Order>>(&path).await? {
            Some(orders) => orders,
            None => {
                write_json_atomic(&path, &Vec::<Order>::new()).await?;
                tracing::info!(path = %path.display(), "Created empty orders file");
                Vec::new()
            }
        };
        tracing::debug!(count = orders.len(), "Orders loaded");

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                orders: Mutex::new(orders),
            }),
        })
    }

    /// Validate and persist a new order
    pub async fn create(&self, draft: OrderDraft) -> RepoResult<Order> {
        self.create_restricted(draft, None).await
    }

    /// Like [`create`](Self::create), additionally rejecting pickup dates
    /// outside `allowed_dates` when given.
    pub async fn create_restricted(
        &self,
        draft: OrderDraft,
        allowed_dates: Option<&[String]>,
    ) -> RepoResult<Order> {
        validate_order_draft(&draft)?;
        if let Some(allowed) = allowed_dates
            && !allowed.iter().any(|d| d == &draft.pickup_date)
        {
            return Err(RepoError::PickupDateUnavailable(draft.pickup_date));
        }

        let mut orders = self.inner.orders.lock().await;

        let id = loop {
            let candidate = generate_order_id();
            if !orders.iter().any(|o| o.id.eq_ignore_ascii_case(&candidate)) {
                break candidate;
            }
        };

        let order = Order {
            id,
            created_at: Utc::now(),
            status: OrderStatus::New,
            total_cents: order_total_cents(&draft.items),
            customer_name: draft.customer_name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            pickup_date: draft.pickup_date.trim().to_string(),
            items: draft.items,
        };

        orders.push(order.clone());
        if let Err(e) = write_json_atomic(&self.inner.path, &*orders).await {
            orders.pop();
            return Err(e);
        }

        tracing::info!(
            order_id = %order.id,
            total_cents = order.total_cents,
            pickup_date = %order.pickup_date,
            "Order created"
        );
        Ok(order)
    }

    /// All orders in creation order
    pub async fn list(&self) -> Vec<Order> {
        self.inner.orders.lock().await.clone()
    }

    /// Orders, optionally narrowed to one status
    pub async fn list_by_status(&self, status: Option<OrderStatus>) -> Vec<Order> {
        let orders = self.inner.orders.lock().await;
        match status {
            Some(status) => orders.iter().filter(|o| o.status == status).cloned().collect(),
            None => orders.clone(),
        }
    }

    /// Find an order by id (case-insensitive)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Order> {
        self.inner
            .orders
            .lock()
            .await
            .iter()
            .find(|o| o.id.eq_ignore_ascii_case(id))
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    /// Set an order's status. Unknown statuses are rejected before the
    /// order is looked up, leaving the store untouched.
    pub async fn update_status(&self, id: &str, status: &str) -> RepoResult<Order> {
        let status: OrderStatus = status
            .parse()
            .map_err(|_| RepoError::InvalidStatus(status.to_string()))?;

        let mut orders = self.inner.orders.lock().await;
        let index = orders
            .iter()
            .position(|o| o.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;

        let previous = orders[index].status;
        orders[index].status = status;
        if let Err(e) = write_json_atomic(&self.inner.path, &*orders).await {
            orders[index].status = previous;
            return Err(e);
        }

        tracing::info!(
            order_id = %orders[index].id,
            from = %previous,
            to = %status,
            "Order status updated"
        );
        Ok(orders[index].clone())
    }
}

/// `ORD-` followed by six uppercase base-36 characters
fn generate_order_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("{ID_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Flavor, OrderItem, Size};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn draft() -> OrderDraft {
        OrderDraft {
            customer_name: "Pat Smith".into(),
            email: "pat@example.com".into(),
            phone: "555-0100".into(),
            pickup_date: "2026-11-13".into(),
            items: vec![
                OrderItem {
                    size: Size::Full,
                    flavor: Flavor::Cajun,
                    qty: 2,
                },
                OrderItem {
                    size: Size::Half,
                    flavor: Flavor::LemonPepper,
                    qty: 1,
                },
            ],
        }
    }

    async fn open_repo(dir: &TempDir) -> OrderRepository {
        OrderRepository::open(dir.path().join("orders.json"))
            .await
            .unwrap()
    }

    #[test]
    fn test_order_id_shape() {
        for _ in 0..100 {
            let id = generate_order_id();
            assert_eq!(id.len(), 10);
            assert!(id.starts_with("ORD-"));
            assert!(
                id[4..]
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
            );
        }
    }

    #[tokio::test]
    async fn test_open_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;
        assert!(dir.path().join("orders.json").exists());
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_computes_total_and_persists() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        let order = repo.create(draft()).await.unwrap();
        assert_eq!(order.total_cents, 13000);
        assert_eq!(order.status, OrderStatus::New);
        assert!(order.id.starts_with("ORD-"));

        let reopened = open_repo(&dir).await;
        let found = reopened.find_by_id(&order.id).await.unwrap();
        assert_eq!(found, order);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_drafts() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        let mut empty = draft();
        empty.items.clear();
        assert!(matches!(repo.create(empty).await, Err(RepoError::EmptyCart)));

        let mut bad_email = draft();
        bad_email.email = "no-at-sign".into();
        match repo.create(bad_email).await {
            Err(RepoError::Validation(msg)) => assert_eq!(msg, "Invalid email address"),
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_restricted_checks_pickup_date() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;
        let allowed = vec!["2026-11-20".to_string()];

        let err = repo
            .create_restricted(draft(), Some(&allowed))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::PickupDateUnavailable(_)));

        let mut ok = draft();
        ok.pickup_date = "2026-11-20".into();
        assert!(repo.create_restricted(ok, Some(&allowed)).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_by_id_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;
        let order = repo.create(draft()).await.unwrap();

        let lower = order.id.to_lowercase();
        assert_eq!(repo.find_by_id(&lower).await.unwrap().id, order.id);
        assert!(matches!(
            repo.find_by_id("ORD-NOPE00").await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_bogus_status_leaves_order_unchanged() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;
        let order = repo.create(draft()).await.unwrap();

        let err = repo.update_status(&order.id, "bogus").await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidStatus(_)));

        let reopened = open_repo(&dir).await;
        assert_eq!(
            reopened.find_by_id(&order.id).await.unwrap().status,
            OrderStatus::New
        );
    }

    #[tokio::test]
    async fn test_update_status_persists() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;
        let order = repo.create(draft()).await.unwrap();

        let updated = repo.update_status(&order.id, "cooking").await.unwrap();
        assert_eq!(updated.status, OrderStatus::Cooking);

        let reopened = open_repo(&dir).await;
        assert_eq!(
            reopened.find_by_id(&order.id).await.unwrap().status,
            OrderStatus::Cooking
        );
        assert!(matches!(
            repo.update_status("ORD-NOPE00", "ready").await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;
        let first = repo.create(draft()).await.unwrap();
        repo.create(draft()).await.unwrap();
        repo.update_status(&first.id, "ready").await.unwrap();

        assert_eq!(repo.list_by_status(None).await.len(), 2);
        let ready = repo.list_by_status(Some(OrderStatus::Ready)).await;
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].id, first.id);
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_all_kept() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        let handles: Vec<_> = (0..25)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(draft()).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let reopened = open_repo(&dir).await;
        let orders = reopened.list().await;
        assert_eq!(orders.len(), 25);
        let ids: HashSet<_> = orders.iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids.len(), 25);
    }

    #[tokio::test]
    async fn test_failed_persist_keeps_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;
        let order = repo.create(draft()).await.unwrap();

        // A directory squatting on the tmp name makes every write fail
        tokio::fs::create_dir(dir.path().join("orders.json.tmp"))
            .await
            .unwrap();

        assert!(matches!(
            repo.create(draft()).await,
            Err(RepoError::Persistence(_))
        ));
        assert_eq!(repo.list().await.len(), 1);

        assert!(matches!(
            repo.update_status(&order.id, "ready").await,
            Err(RepoError::Persistence(_))
        ));
        assert_eq!(
            repo.find_by_id(&order.id).await.unwrap().status,
            OrderStatus::New
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.json");
        tokio::fs::write(&path, b"[{").await.unwrap();
        assert!(matches!(
            OrderRepository::open(&path).await,
            Err(RepoError::Serialization(_))
        ));
    }
}
