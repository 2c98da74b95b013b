//! Order Model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::{Flavor, Size};

/// Order status
///
/// Closed set. Transitions are not enforced; staff may move an order to any
/// status from any status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    Confirmed,
    Preparing,
    Cooking,
    Ready,
    PickedUp,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::New,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Cooking,
        OrderStatus::Ready,
        OrderStatus::PickedUp,
        OrderStatus::Canceled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Cooking => "cooking",
            OrderStatus::Ready => "ready",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is outside [`OrderStatus::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

fn default_qty() -> u32 {
    1
}

/// One cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub size: Size,
    pub flavor: Flavor,
    /// Missing quantity counts as one
    #[serde(default = "default_qty")]
    pub qty: u32,
}

impl OrderItem {
    pub fn line_total_cents(&self) -> u64 {
        self.size.unit_price_cents() * u64::from(self.qty)
    }
}

/// Sum of every line at the current price table
pub fn order_total_cents(items: &[OrderItem]) -> u64 {
    items.iter().map(OrderItem::line_total_cents).sum()
}

/// `13000` -> `$130.00`
pub fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Persisted order
///
/// Only `status` changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_cents: u64,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    /// ISO date (`YYYY-MM-DD`)
    pub pickup_date: String,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// `2x Full Turkey - Cajun, 1x Half Turkey - Fajita`
    pub fn contents_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                format!(
                    "{}x {} Turkey - {}",
                    item.qty,
                    item.size.label(),
                    item.flavor.name()
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Customer-submitted order (`POST /api/orders`)
///
/// Every field defaults so that missing input is reported by validation with
/// a precise reason instead of a generic decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub pickup_date: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Success payload for order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: String,
    pub total_cents: u64,
}

/// Status update payload (`PUT /api/admin/orders/{id}/status`)
///
/// `status` is kept as a string so values outside the enum reach the store
/// and are reported as an invalid status. The payment fields are not stored;
/// they are only mirrored onto the exported spreadsheet row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_received: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
        assert_eq!(
            "bogus".parse::<OrderStatus>(),
            Err(UnknownStatus("bogus".to_string()))
        );
        assert!("PickedUp".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_total_uses_price_table() {
        let items = vec![
            OrderItem {
                size: Size::Full,
                flavor: Flavor::Cajun,
                qty: 2,
            },
            OrderItem {
                size: Size::Half,
                flavor: Flavor::Fajita,
                qty: 1,
            },
        ];
        assert_eq!(order_total_cents(&items), 13000);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(13000), "$130.00");
        assert_eq!(format_cents(5), "$0.05");
    }

    #[test]
    fn test_missing_qty_defaults_to_one() {
        let item: OrderItem =
            serde_json::from_str(r#"{"size":"half","flavor":"Lemon Pepper"}"#).unwrap();
        assert_eq!(item.qty, 1);
        assert_eq!(item.line_total_cents(), 3000);
    }

    #[test]
    fn test_contents_summary() {
        let order = Order {
            id: "ORD-AAAAAA".into(),
            created_at: Utc::now(),
            status: OrderStatus::New,
            total_cents: 8000,
            customer_name: "Pat".into(),
            email: "pat@example.com".into(),
            phone: "555-0100".into(),
            pickup_date: "2026-11-13".into(),
            items: vec![
                OrderItem {
                    size: Size::Full,
                    flavor: Flavor::HoneyMustard,
                    qty: 1,
                },
                OrderItem {
                    size: Size::Half,
                    flavor: Flavor::Cajun,
                    qty: 1,
                },
            ],
        };
        assert_eq!(
            order.contents_summary(),
            "1x Full Turkey - Honey Mustard, 1x Half Turkey - Cajun"
        );
    }
}
