//! Input validation helpers
//!
//! Text limits and the checks every new order goes through before anything
//! is written.

use std::sync::LazyLock;

use regex::Regex;
use shared::models::OrderDraft;

use crate::db::RepoError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer names
pub const MAX_NAME_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Something, `@`, something, `.`, something; no whitespace
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Basic syntactic email check
pub fn is_valid_email(value: &str) -> bool {
    value.len() <= MAX_EMAIL_LEN && EMAIL_RE.is_match(value)
}

fn invalid(msg: &str) -> RepoError {
    RepoError::Validation(msg.to_string())
}

/// Validate a customer draft. Returns the first failing reason.
///
/// Size and flavor are already enforced by deserialization.
pub fn validate_order_draft(draft: &OrderDraft) -> Result<(), RepoError> {
    let name = draft.customer_name.trim();
    if name.is_empty() || draft.customer_name.chars().count() > MAX_NAME_LEN {
        return Err(invalid("Invalid customer name"));
    }
    if !is_valid_email(&draft.email) {
        return Err(invalid("Invalid email address"));
    }
    if draft.phone.trim().is_empty() {
        return Err(invalid("Missing phone number"));
    }
    if draft.pickup_date.trim().is_empty() {
        return Err(invalid("Missing pickup date"));
    }
    if draft.items.is_empty() {
        return Err(RepoError::EmptyCart);
    }
    if draft.items.iter().any(|item| item.qty == 0) {
        return Err(invalid("Invalid item quantity"));
    }
    Ok(())
}

/// Validate a list of staff notification addresses
pub fn validate_email_list(emails: &[String]) -> Result<(), RepoError> {
    match emails
        .iter()
        .map(|e| e.trim())
        .find(|e| !e.is_empty() && !is_valid_email(e))
    {
        Some(bad) => Err(RepoError::InvalidSettings(format!(
            "Invalid notification email: {bad}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Flavor, OrderItem, Size};

    fn draft() -> OrderDraft {
        OrderDraft {
            customer_name: "Pat Smith".into(),
            email: "pat@example.com".into(),
            phone: "555-0100".into(),
            pickup_date: "2026-11-13".into(),
            items: vec![OrderItem {
                size: Size::Full,
                flavor: Flavor::Cajun,
                qty: 1,
            }],
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_order_draft(&draft()).is_ok());
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email(""));
    }

    fn reason(d: &OrderDraft) -> String {
        validate_order_draft(d).unwrap_err().to_string()
    }

    #[test]
    fn test_each_failure_reason() {
        let mut d = draft();
        d.customer_name = "   ".into();
        assert_eq!(reason(&d), "Invalid customer name");

        let mut d = draft();
        d.customer_name = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(reason(&d), "Invalid customer name");

        let mut d = draft();
        d.email = "no-at-sign".into();
        assert_eq!(reason(&d), "Invalid email address");

        let mut d = draft();
        d.phone.clear();
        assert_eq!(reason(&d), "Missing phone number");

        let mut d = draft();
        d.pickup_date.clear();
        assert_eq!(reason(&d), "Missing pickup date");

        let mut d = draft();
        d.items.clear();
        assert_eq!(reason(&d), "Cart is empty");

        let mut d = draft();
        d.items[0].qty = 0;
        assert_eq!(reason(&d), "Invalid item quantity");
    }

    #[test]
    fn test_email_list() {
        assert!(validate_email_list(&["a@b.co".into(), "".into()]).is_ok());
        assert!(validate_email_list(&["a@b.co".into(), "nope".into()]).is_err());
    }
}
