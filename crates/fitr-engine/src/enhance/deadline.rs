//! Deadline urgency boost.

use chrono::NaiveDate;

use crate::dates::{DateField, parse_date_field};

/// Boosts postings whose expiration date is near.
///
/// A future expiration `d` days away yields `max_boost × e^(−d / decay_days)`, floored at 1.0.
/// Past, missing, ongoing or unparsable expirations yield 1.0.
pub fn deadline_boost(expiration: &str, today: NaiveDate, max_boost: f64, decay_days: f64) -> f64 {
    let expires = match parse_date_field(expiration) {
        DateField::Date(d) => d,
        DateField::Unparsable => {
            tracing::debug!(expiration, "unparsable expiration date, deadline weight left neutral");
            return 1.0;
        }
        DateField::Present | DateField::Missing => return 1.0,
    };
    let days = (expires - today).num_days();
    if days <= 0 || decay_days <= 0.0 {
        return 1.0;
    }
    (max_boost * (-(days as f64) / decay_days).exp()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn near_deadline_boosts_more() {
        let soon = deadline_boost("2025-01-11", today(), 1.5, 30.0);
        let later = deadline_boost("2025-10-28", today(), 1.5, 30.0);

        assert!((soon - 1.5 * (-10.0f64 / 30.0).exp()).abs() < 1e-12);
        assert_eq!(later, 1.0);
        assert!(soon > later);
    }

    #[test]
    fn past_and_missing_deadlines_are_neutral() {
        assert_eq!(deadline_boost("2024-12-01", today(), 1.5, 30.0), 1.0);
        assert_eq!(deadline_boost("2025-01-01", today(), 1.5, 30.0), 1.0);
        assert_eq!(deadline_boost("", today(), 1.5, 30.0), 1.0);
        assert_eq!(deadline_boost("soon-ish", today(), 1.5, 30.0), 1.0);
    }

    #[test]
    fn never_below_one() {
        assert_eq!(deadline_boost("2025-01-02", today(), 0.5, 30.0), 1.0);
        assert_eq!(deadline_boost("2025-01-02", today(), 1.5, 0.0), 1.0);
    }
}
