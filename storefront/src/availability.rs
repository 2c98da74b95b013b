//! Availability view
//!
//! Derived entirely from the admin's per-date overrides. Placed orders are
//! not counted.

use shared::models::{
    Availability, CAP_FULL, CAP_HALF, PLACEHOLDER_REMAINING_FULL, PLACEHOLDER_REMAINING_HALF,
    Settings, Size, StockStatus,
};

/// Stock status and remaining count for both sizes on `date`
pub fn availability(settings: &Settings, date: &str) -> Availability {
    let (status_full, status_half) = match settings.override_for(date) {
        Some(o) => (o.status(Size::Full), o.status(Size::Half)),
        None => (StockStatus::Ok, StockStatus::Ok),
    };

    Availability {
        cap_full: CAP_FULL,
        cap_half: CAP_HALF,
        remaining_full: remaining(status_full, PLACEHOLDER_REMAINING_FULL),
        remaining_half: remaining(status_half, PLACEHOLDER_REMAINING_HALF),
        status_full,
        status_half,
    }
}

fn remaining(status: StockStatus, placeholder: u32) -> u32 {
    match status {
        StockStatus::Out => 0,
        StockStatus::Ok | StockStatus::Low => placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DateOverride;

    #[test]
    fn test_no_override_is_ok_with_placeholders() {
        let a = availability(&Settings::default(), "2026-11-13");
        assert_eq!(a.status_full, StockStatus::Ok);
        assert_eq!(a.status_half, StockStatus::Ok);
        assert_eq!(a.remaining_full, 20);
        assert_eq!(a.remaining_half, 8);
        assert_eq!(a.cap_full, 30);
        assert_eq!(a.cap_half, 10);
    }

    #[test]
    fn test_out_zeroes_remaining_low_keeps_placeholder() {
        let mut settings = Settings::default();
        settings.status_overrides.insert(
            "2026-11-13".into(),
            DateOverride {
                full: Some(StockStatus::Out),
                half: Some(StockStatus::Low),
            },
        );

        let a = availability(&settings, "2026-11-13");
        assert_eq!(a.status_full, StockStatus::Out);
        assert_eq!(a.remaining_full, 0);
        assert_eq!(a.status_half, StockStatus::Low);
        assert_eq!(a.remaining_half, 8);

        let other = availability(&settings, "2026-11-14");
        assert_eq!(other.remaining_full, 20);
    }

    #[test]
    fn test_partial_override_defaults_missing_size() {
        let mut settings = Settings::default();
        settings.status_overrides.insert(
            "2026-11-15".into(),
            DateOverride {
                full: None,
                half: Some(StockStatus::Out),
            },
        );
        let a = availability(&settings, "2026-11-15");
        assert_eq!(a.status_full, StockStatus::Ok);
        assert_eq!(a.remaining_full, 20);
        assert_eq!(a.remaining_half, 0);
    }
}
