//! Google Sheets export via REST API (no SDK dependency)
//!
//! Authenticates with a service-account key: a signed RS256 assertion is
//! exchanged for an OAuth access token, which is cached until shortly before
//! it expires.

use std::time::{Duration, Instant};

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::models::{Order, format_cents};
use tokio::sync::Mutex;

use super::{OrderExporter, RowUpdate};
use crate::core::config::SheetsConfig;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before the token actually expires
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);
/// Payment method lives in column H
const PAYMENT_METHOD_COLUMN: &str = "H";
/// Payment received (`Yes` / `No`) lives in column I
const PAYMENT_RECEIVED_COLUMN: &str = "I";
/// Status lives in column K
const STATUS_COLUMN: &str = "K";

/// The fields used from a service-account key file
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

pub struct SheetsExporter {
    client: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    sheet_id: String,
    range: String,
    tz: Tz,
    token: Mutex<Option<CachedToken>>,
}

impl SheetsExporter {
    /// Load the service-account key named in `config`
    pub fn from_config(config: &SheetsConfig, tz: Tz) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config.credentials_path).with_context(|| {
            format!(
                "Google credentials file not found at {}",
                config.credentials_path.display()
            )
        })?;
        let key: ServiceAccountKey =
            serde_json::from_str(&raw).context("invalid Google credentials file")?;
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .context("invalid service-account private key")?;

        Ok(Self {
            client: reqwest::Client::new(),
            key,
            encoding_key,
            sheet_id: config.sheet_id.clone(),
            range: config.range.clone(),
            tz,
            token: Mutex::new(None),
        })
    }

    /// Cached access token, fetching a fresh one when needed
    async fn access_token(&self) -> anyhow::Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && Instant::now() < token.refresh_at
        {
            return Ok(token.access_token.clone());
        }

        let now = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .context("failed to sign token assertion")?;

        let resp = self
            .client
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .context("token request failed")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("token endpoint returned {status}: {body}");
        }
        let token: TokenResponse = resp.json().await.context("invalid token response")?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        tracing::debug!(expires_in = token.expires_in, "Sheets access token refreshed");
        Ok(token.access_token)
    }

    /// `{SHEETS_API}/{sheet_id}/{segments...}`, each segment percent-encoded
    fn spreadsheet_url(&self, segments: &[&str]) -> anyhow::Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(SHEETS_API)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("cannot build Sheets URL"))?
            .push(&self.sheet_id)
            .extend(segments);
        Ok(url)
    }

    async fn append_rows(&self, rows: Vec<Vec<String>>) -> anyhow::Result<()> {
        let token = self.access_token().await?;
        let url = self.spreadsheet_url(&["values", format!("{}:append", self.range).as_str()])?;

        let resp = self
            .client
            .post(url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": rows }))
            .send()
            .await
            .context("append request failed")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Sheets append returned {status}: {body}");
        }
        Ok(())
    }

    async fn read_rows(&self) -> anyhow::Result<Vec<Vec<String>>> {
        let token = self.access_token().await?;
        let url = self.spreadsheet_url(&["values", self.range.as_str()])?;

        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .context("read request failed")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Sheets read returned {status}: {body}");
        }
        let range: ValueRange = resp.json().await.context("invalid Sheets response")?;
        Ok(range.values)
    }

    async fn write_cells(&self, updates: Vec<(String, String)>) -> anyhow::Result<()> {
        let token = self.access_token().await?;
        let url = self.spreadsheet_url(&["values:batchUpdate"])?;

        let data: Vec<_> = updates
            .into_iter()
            .map(|(range, value)| json!({ "range": range, "values": [[value]] }))
            .collect();

        let resp = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "valueInputOption": "USER_ENTERED", "data": data }))
            .send()
            .await
            .context("batch update request failed")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Sheets batch update returned {status}: {body}");
        }
        Ok(())
    }
}

#[async_trait]
impl OrderExporter for SheetsExporter {
    async fn export_order(&self, order: &Order) -> anyhow::Result<()> {
        self.append_rows(vec![order_row(order, self.tz)]).await?;
        tracing::info!(order_id = %order.id, "Order exported to Google Sheets");
        Ok(())
    }

    async fn update_order(&self, order_id: &str, update: &RowUpdate) -> anyhow::Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        let rows = self.read_rows().await?;
        let Some(row_number) = find_row(&rows, order_id) else {
            tracing::warn!(order_id = %order_id, "Order not found in sheet");
            return Ok(());
        };

        let cells = update_cells(sheet_name(&self.range), row_number, update);
        self.write_cells(cells).await?;
        tracing::info!(order_id = %order_id, "Order updated in Google Sheets");
        Ok(())
    }

    async fn bulk_export(&self, orders: &[Order]) -> anyhow::Result<usize> {
        if orders.is_empty() {
            return Ok(0);
        }
        let rows = orders.iter().map(|o| order_row(o, self.tz)).collect();
        self.append_rows(rows).await?;
        tracing::info!(count = orders.len(), "Bulk exported orders to Google Sheets");
        Ok(orders.len())
    }
}

/// Sheet tab name from an A1 range (`Sheet1!A:K` -> `Sheet1`)
fn sheet_name(range: &str) -> &str {
    range.split_once('!').map_or(range, |(name, _)| name)
}

/// 1-based sheet row holding `order_id`, skipping the header row
fn find_row(rows: &[Vec<String>], order_id: &str) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(1)
        .find(|(_, row)| row.first().is_some_and(|id| id == order_id))
        .map(|(index, _)| index + 1)
}

/// `(A1 cell, value)` pairs for the fields set in `update`
fn update_cells(sheet: &str, row: usize, update: &RowUpdate) -> Vec<(String, String)> {
    let mut cells = Vec::new();
    if let Some(status) = update.status {
        cells.push((format!("{sheet}!{STATUS_COLUMN}{row}"), status.to_string()));
    }
    if let Some(method) = &update.payment_method {
        cells.push((format!("{sheet}!{PAYMENT_METHOD_COLUMN}{row}"), method.clone()));
    }
    if let Some(received) = update.payment_received {
        cells.push((
            format!("{sheet}!{PAYMENT_RECEIVED_COLUMN}{row}"),
            yes_no(received).to_string(),
        ));
    }
    cells
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Spreadsheet row:
/// id, order date, name, email, phone, contents, total,
/// payment method, payment received, pickup date, status
pub fn order_row(order: &Order, tz: Tz) -> Vec<String> {
    let order_date = order
        .created_at
        .with_timezone(&tz)
        .format("%b %-d, %Y, %-I:%M %p")
        .to_string();
    let pickup_date = NaiveDate::parse_from_str(&order.pickup_date, "%Y-%m-%d")
        .map(|d| d.format("%a, %b %-d, %Y").to_string())
        .unwrap_or_else(|_| order.pickup_date.clone());

    vec![
        order.id.clone(),
        order_date,
        order.customer_name.clone(),
        order.email.clone(),
        order.phone.clone(),
        order.contents_summary(),
        format_cents(order.total_cents),
        String::new(),
        yes_no(false).to_string(),
        pickup_date,
        order.status.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{Flavor, OrderItem, OrderStatus, Size};

    fn order() -> Order {
        Order {
            id: "ORD-7K2Q9Z".into(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 18, 20, 4, 0).unwrap(),
            status: OrderStatus::Confirmed,
            total_cents: 13000,
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
                    flavor: Flavor::Fajita,
                    qty: 1,
                },
            ],
        }
    }

    #[test]
    fn test_order_row_layout() {
        let row = order_row(&order(), chrono_tz::America::Chicago);
        assert_eq!(
            row,
            vec![
                "ORD-7K2Q9Z",
                "Oct 18, 2026, 3:04 PM",
                "Pat Smith",
                "pat@example.com",
                "555-0100",
                "2x Full Turkey - Cajun, 1x Half Turkey - Fajita",
                "$130.00",
                "",
                "No",
                "Fri, Nov 13, 2026",
                "confirmed",
            ]
        );
    }

    #[test]
    fn test_unparseable_pickup_date_kept_verbatim() {
        let mut o = order();
        o.pickup_date = "next friday".into();
        let row = order_row(&o, chrono_tz::UTC);
        assert_eq!(row[9], "next friday");
    }

    #[test]
    fn test_find_row_skips_header() {
        let rows = vec![
            vec!["Order ID".to_string(), "Order Date".to_string()],
            vec!["ORD-AAAAAA".to_string()],
            vec![],
            vec!["ORD-BBBBBB".to_string(), "x".to_string()],
        ];
        assert_eq!(find_row(&rows, "ORD-BBBBBB"), Some(4));
        assert_eq!(find_row(&rows, "Order ID"), None);
        assert_eq!(find_row(&rows, "ORD-CCCCCC"), None);
    }

    #[test]
    fn test_update_cells_only_touch_given_fields() {
        let status_only = RowUpdate {
            status: Some(OrderStatus::Ready),
            ..Default::default()
        };
        assert_eq!(
            update_cells("Sheet1", 4, &status_only),
            vec![("Sheet1!K4".to_string(), "ready".to_string())]
        );

        let payment = RowUpdate {
            status: Some(OrderStatus::PickedUp),
            payment_method: Some("Venmo".into()),
            payment_received: Some(true),
        };
        assert_eq!(
            update_cells("Orders", 12, &payment),
            vec![
                ("Orders!K12".to_string(), "picked_up".to_string()),
                ("Orders!H12".to_string(), "Venmo".to_string()),
                ("Orders!I12".to_string(), "Yes".to_string()),
            ]
        );

        assert!(update_cells("Sheet1", 2, &RowUpdate::default()).is_empty());
    }

    #[test]
    fn test_sheet_name() {
        assert_eq!(sheet_name("Sheet1!A:K"), "Sheet1");
        assert_eq!(sheet_name("Orders"), "Orders");
    }
}
