//! Site Settings Model (singleton document)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::product::Size;

/// Admin-set stock status for one size on one pickup date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[default]
    Ok,
    Low,
    Out,
}

/// Per-date override; a missing size means `ok`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<StockStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half: Option<StockStatus>,
}

impl DateOverride {
    pub fn status(&self, size: Size) -> StockStatus {
        match size {
            Size::Full => self.full,
            Size::Half => self.half,
        }
        .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactPatch {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Payment instructions shown to customers; money is reconciled by hand
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentMethods {
    pub venmo_enabled: bool,
    pub venmo_username: String,
    pub zelle_enabled: bool,
    pub zelle_info: String,
    pub cash_enabled: bool,
    pub cash_instructions: String,
    pub payment_note: String,
}

impl PaymentMethods {
    /// Human-readable lines for every enabled method, plus the note
    pub fn instructions(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.venmo_enabled && !self.venmo_username.is_empty() {
            lines.push(format!("Venmo: {}", self.venmo_username));
        }
        if self.zelle_enabled && !self.zelle_info.is_empty() {
            lines.push(format!("Zelle: {}", self.zelle_info));
        }
        if self.cash_enabled {
            if self.cash_instructions.is_empty() {
                lines.push("Cash at pickup".to_string());
            } else {
                lines.push(format!("Cash: {}", self.cash_instructions));
            }
        }
        if !self.payment_note.is_empty() {
            lines.push(self.payment_note.clone());
        }
        lines
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentMethodsPatch {
    pub venmo_enabled: Option<bool>,
    pub venmo_username: Option<String>,
    pub zelle_enabled: Option<bool>,
    pub zelle_info: Option<String>,
    pub cash_enabled: Option<bool>,
    pub cash_instructions: Option<String>,
    pub payment_note: Option<String>,
}

/// The settings document stored in `settings.json`
///
/// Top-level keys this version does not know about are kept in `extra` and
/// written back untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub instagram_url: String,
    pub contact: Contact,
    /// Keyed by ISO pickup date
    pub status_overrides: BTreeMap<String, DateOverride>,
    pub notification_emails: Vec<String>,
    pub payment_methods: PaymentMethods,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial update (`PUT /api/admin/settings`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingsPatch {
    pub instagram_url: Option<String>,
    pub contact: Option<ContactPatch>,
    /// Each provided date replaces that date's override
    pub status_overrides: Option<BTreeMap<String, DateOverride>>,
    /// Replaces the whole list when provided
    pub notification_emails: Option<Vec<String>>,
    pub payment_methods: Option<PaymentMethodsPatch>,
}

impl Settings {
    /// Apply a patch; keys absent from the patch are left as they are.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(url) = patch.instagram_url {
            self.instagram_url = url;
        }

        if let Some(contact) = patch.contact {
            if let Some(phone) = contact.phone {
                self.contact.phone = phone;
            }
            if let Some(email) = contact.email {
                self.contact.email = email;
            }
            if let Some(address) = contact.address {
                self.contact.address = address;
            }
        }

        if let Some(overrides) = patch.status_overrides {
            self.status_overrides.extend(overrides);
        }

        if let Some(emails) = patch.notification_emails {
            self.notification_emails = dedupe_emails(emails);
        }

        if let Some(pm) = patch.payment_methods {
            let target = &mut self.payment_methods;
            if let Some(v) = pm.venmo_enabled {
                target.venmo_enabled = v;
            }
            if let Some(v) = pm.venmo_username {
                target.venmo_username = v;
            }
            if let Some(v) = pm.zelle_enabled {
                target.zelle_enabled = v;
            }
            if let Some(v) = pm.zelle_info {
                target.zelle_info = v;
            }
            if let Some(v) = pm.cash_enabled {
                target.cash_enabled = v;
            }
            if let Some(v) = pm.cash_instructions {
                target.cash_instructions = v;
            }
            if let Some(v) = pm.payment_note {
                target.payment_note = v;
            }
        }
    }

    /// Override for a pickup date, if the admin set one
    pub fn override_for(&self, date: &str) -> Option<&DateOverride> {
        self.status_overrides.get(date)
    }
}

/// Trim, drop blanks and keep the first spelling of each address (case-insensitive)
fn dedupe_emails(emails: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(emails.len());
    for email in emails {
        let email = email.trim().to_string();
        if email.is_empty() {
            continue;
        }
        if !out.iter().any(|e| e.eq_ignore_ascii_case(&email)) {
            out.push(email);
        }
    }
    out
}

/// Unauthenticated projection (`GET /api/settings`)
///
/// Stock overrides and staff notification addresses stay private.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicSettings {
    pub payment_methods: PaymentMethods,
    pub contact: Contact,
    pub instagram_url: String,
}

impl From<&Settings> for PublicSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            payment_methods: settings.payment_methods.clone(),
            contact: settings.contact.clone(),
            instagram_url: settings.instagram_url.clone(),
        }
    }
}
