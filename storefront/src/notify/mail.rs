//! Mail API notifier (REST, no SDK dependency)

use anyhow::{Context, bail};
use async_trait::async_trait;
use serde::Serialize;
use shared::models::{Order, Settings, format_cents};

use super::{MailMessage, OrderNotifier};
use crate::core::config::MailConfig;

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
}

pub struct MailApiNotifier {
    client: reqwest::Client,
    config: MailConfig,
}

impl MailApiNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn send(&self, message: &MailMessage) -> anyhow::Result<()> {
        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&SendRequest {
                from: &self.config.from,
                to: &message.to,
                subject: &message.subject,
                text: &message.text,
            })
            .send()
            .await
            .context("mail API request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("mail API returned {status}: {body}");
        }

        tracing::info!(to = ?message.to, subject = %message.subject, "Mail sent");
        Ok(())
    }
}

#[async_trait]
impl OrderNotifier for MailApiNotifier {
    async fn order_created(&self, order: &Order, settings: &Settings) -> anyhow::Result<()> {
        let mut first_error = None;

        if let Some(notice) = staff_notice(order, settings)
            && let Err(e) = self.send(&notice).await
        {
            tracing::warn!(order_id = %order.id, error = %e, "Staff notification failed");
            first_error = Some(e);
        }

        let confirmation = customer_confirmation(order, settings);
        if let Err(e) = self.send(&confirmation).await {
            tracing::warn!(order_id = %order.id, error = %e, "Customer confirmation failed");
            first_error.get_or_insert(e);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn item_lines(order: &Order) -> String {
    order
        .items
        .iter()
        .map(|item| {
            format!(
                "  {}x {} Turkey - {} ({})",
                item.qty,
                item.size.label(),
                item.flavor.name(),
                format_cents(item.line_total_cents())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Notice to every staff address; `None` when no address is configured
pub fn staff_notice(order: &Order, settings: &Settings) -> Option<MailMessage> {
    if settings.notification_emails.is_empty() {
        return None;
    }

    let text = format!(
        "New order {id}\n\n\
         Customer: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Pickup date: {pickup}\n\n\
         Items:\n{items}\n\n\
         Total: {total}",
        id = order.id,
        name = order.customer_name,
        email = order.email,
        phone = order.phone,
        pickup = order.pickup_date,
        items = item_lines(order),
        total = format_cents(order.total_cents),
    );

    Some(MailMessage {
        to: settings.notification_emails.clone(),
        subject: format!("New order {} - {}", order.id, order.customer_name),
        text,
    })
}

/// Confirmation to the customer, including how to pay
pub fn customer_confirmation(order: &Order, settings: &Settings) -> MailMessage {
    let mut text = format!(
        "Hi {name},\n\n\
         Thanks for your order! Your order number is {id}.\n\n\
         Items:\n{items}\n\n\
         Total: {total}\n\
         Pickup date: {pickup}\n",
        name = order.customer_name,
        id = order.id,
        items = item_lines(order),
        total = format_cents(order.total_cents),
        pickup = order.pickup_date,
    );

    let payment = settings.payment_methods.instructions();
    if !payment.is_empty() {
        text.push_str("\nPayment options:\n");
        for line in payment {
            text.push_str("  ");
            text.push_str(&line);
            text.push('\n');
        }
    }

    if !settings.contact.phone.is_empty() || !settings.contact.email.is_empty() {
        text.push_str("\nQuestions? Reach us at ");
        let contact: Vec<&str> = [settings.contact.phone.as_str(), settings.contact.email.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        text.push_str(&contact.join(" or "));
        text.push('\n');
    }

    MailMessage {
        to: vec![order.email.clone()],
        subject: format!("Your turkey order {}", order.id),
        text,
    }
}
