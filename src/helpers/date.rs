//! Date helper functions

use chrono::NaiveDate;

/// Format a date with a strftime pattern
///
/// # Examples
/// ```ignore
/// format_date(&date, "%Y/%-m/%-d") // -> "2024/1/5"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    // An invalid pattern makes chrono's Display fail, fall back to ISO
    if write!(out, "{}", date.format(format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Midnight UTC in RFC 3339, for feeds
pub fn date_xml(date: &NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

/// Whole days from `start` to `today`, never negative
pub fn days_between(start: &NaiveDate, today: &NaiveDate) -> i64 {
    (*today - *start).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&date(2024, 1, 5), "%Y/%-m/%-d"), "2024/1/5");
        assert_eq!(format_date(&date(2024, 1, 5), "%Y-%m-%d"), "2024-01-05");
    }

    #[test]
    fn test_format_date_invalid_pattern() {
        assert_eq!(format_date(&date(2024, 1, 5), "%Q"), "2024-01-05");
    }

    #[test]
    fn test_date_xml() {
        assert_eq!(date_xml(&date(2024, 1, 28)), "2024-01-28T00:00:00Z");
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(&date(2024, 1, 1), &date(2024, 1, 31)), 30);
        assert_eq!(days_between(&date(2024, 2, 1), &date(2024, 1, 31)), 0);
    }
}
