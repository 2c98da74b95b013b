//! Pickup date rule
//!
//! Customers pick up on the Friday, Saturday or Sunday of the weekend that
//! starts on or after three weeks from today.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// Lead time before the earliest pickup
pub const LEAD_DAYS: i64 = 21;

/// Today's date in the business time zone
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// The three allowed pickup dates (Fri, Sat, Sun) for `today`
///
/// base = today + 21 days; Friday is the first Friday on or after base.
pub fn allowed_pickup_dates(today: NaiveDate) -> [NaiveDate; 3] {
    let base = today + Duration::days(LEAD_DAYS);
    let days_to_friday = (Weekday::Fri.num_days_from_monday() + 7
        - base.weekday().num_days_from_monday())
        % 7;
    let friday = base + Duration::days(i64::from(days_to_friday));
    [friday, friday + Duration::days(1), friday + Duration::days(2)]
}

/// Same as [`allowed_pickup_dates`], formatted `YYYY-MM-DD`
pub fn allowed_pickup_dates_iso(today: NaiveDate) -> Vec<String> {
    allowed_pickup_dates(today)
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_year_sweep() {
        let mut today = ymd(2026, 1, 1);
        while today < ymd(2027, 1, 1) {
            let [fri, sat, sun] = allowed_pickup_dates(today);
            assert_eq!(fri.weekday(), Weekday::Fri, "today={today}");
            assert_eq!(sat, fri + Duration::days(1));
            assert_eq!(sun, fri + Duration::days(2));

            let base = today + Duration::days(LEAD_DAYS);
            let lead = (fri - base).num_days();
            assert!((0..7).contains(&lead), "today={today} lead={lead}");

            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_base_on_friday_uses_that_friday() {
        // 2026-10-23 is a Friday; 21 days earlier is 2026-10-02
        let dates = allowed_pickup_dates(ymd(2026, 10, 2));
        assert_eq!(dates, [ymd(2026, 10, 23), ymd(2026, 10, 24), ymd(2026, 10, 25)]);
    }

    #[test]
    fn test_base_on_saturday_moves_to_next_friday() {
        let dates = allowed_pickup_dates(ymd(2026, 10, 3));
        assert_eq!(dates[0], ymd(2026, 10, 30));
    }

    #[test]
    fn test_base_on_sunday_moves_to_next_friday() {
        let dates = allowed_pickup_dates(ymd(2026, 10, 4));
        assert_eq!(dates[0], ymd(2026, 10, 30));
    }

    #[test]
    fn test_iso_format() {
        let iso = allowed_pickup_dates_iso(ymd(2026, 10, 18));
        assert_eq!(iso, vec!["2026-11-13", "2026-11-14", "2026-11-15"]);
    }
}
