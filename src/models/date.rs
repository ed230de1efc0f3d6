//! Operation date parsing
//!
//! Accepts the common day-first and ISO layouts, with or without a time of
//! day, and falls back to the storage layout `dd-MM-yyyy HH:mm:ss`.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Layout used when writing dates to storage
pub const STORAGE_DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Layout for report rows when none (or an unusable one) is configured
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

const DATE_TIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d.%m.%Y", "%d-%m-%Y"];

/// Parse a user or storage supplied date; date-only input means midnight
pub fn parse_operation_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim().trim_matches('"').trim();
    if input.is_empty() {
        return None;
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Some(parsed);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(input, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.naive_local());
    }

    NaiveDateTime::parse_from_str(input, STORAGE_DATE_FORMAT).ok()
}

/// Render a date in the storage layout
pub fn format_storage_date(date: &NaiveDateTime) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

fn render(date: &NaiveDateTime, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

/// Check that a strftime pattern can render a date without a time zone
pub fn is_valid_display_format(pattern: &str) -> bool {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return false;
    }

    // Offset specifiers parse fine but fail on naive dates
    NaiveDate::from_ymd_opt(2020, 6, 24)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .is_some_and(|sample| render(&sample, pattern).is_some())
}

/// Render a date for display, falling back to [`DISPLAY_DATE_FORMAT`]
pub fn format_display_date(date: &NaiveDateTime, pattern: &str) -> String {
    render(date, pattern)
        .or_else(|| render(date, DISPLAY_DATE_FORMAT))
        .unwrap_or_default()
}
