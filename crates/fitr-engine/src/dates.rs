//! Lenient date parsing for profile and posting records.
//!
//! Records come from forms and spreadsheets, so dates arrive in many shapes. Anything that
//! cannot be understood is reported as [`DateField::Unparsable`] and the caller falls back to
//! a neutral weight.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Full-date formats tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%B %d, %Y", "%b %d, %Y", "%B %d %Y",
    "%b %d %Y", "%d %B %Y", "%d %b %Y",
];

/// Date-time formats without a zone, tried in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Words that mark an ongoing entry.
const ONGOING: &[&str] = &["present", "current", "currently", "now", "ongoing", "to date"];

/// A parsed date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// The field is absent or blank.
    Missing,
    /// The field says the entry is still ongoing.
    Present,
    /// A calendar date.
    Date(NaiveDate),
    /// The field has text that is not a recognizable date.
    Unparsable,
}

impl DateField {
    /// Returns the date, if one was parsed.
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }
}

/// Parses a free-form date field.
///
/// Month-only dates resolve to the first of the month and year-only dates to January 1st.
pub fn parse_date_field(raw: &str) -> DateField {
    let s = raw.trim();
    if s.is_empty() {
        return DateField::Missing;
    }
    let lower = s.to_lowercase();
    if ONGOING.contains(&lower.as_str()) {
        return DateField::Present;
    }
    parse_date(s).map_or(DateField::Unparsable, DateField::Date)
}

/// Parses a date in any supported format.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    parse_partial_date(s)
}

/// Parses month-year and year-only dates.
fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    let month_year = [
        (format!("01 {s}"), "%d %B %Y"),
        (format!("01 {s}"), "%d %b %Y"),
        (format!("{s}-01"), "%Y-%m-%d"),
        (format!("01/{s}"), "%d/%m/%Y"),
    ];
    for (candidate, fmt) in &month_year {
        if let Ok(d) = NaiveDate::parse_from_str(candidate, fmt) {
            return Some(d);
        }
    }
    if s.len() == 4
        && let Ok(year) = s.parse::<i32>()
    {
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

/// Renders a date field for display keys: ISO format when parsable, trimmed text otherwise.
pub fn display_date(raw: &str) -> String {
    match parse_date_field(raw) {
        DateField::Date(d) => d.format("%Y-%m-%d").to_string(),
        _ => raw.trim().to_string(),
    }
}
