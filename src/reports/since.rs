//! "Since" report range
//!
//! Turns a relative period such as `3`, `3m` or `1y` into the list of
//! calendar months a report should cover, ending with the current month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use crate::error::ValidationError;

/// How far back a report reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SincePeriod {
    /// Everything since the earliest reportable month
    All,
    Months(u32),
    Years(u32),
}

impl SincePeriod {
    /// Parse `""`, `N`, `Nm` or `Ny`
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::All);
        }

        let invalid = || ValidationError::InvalidSincePeriod(input.to_string());
        let split = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());
        let (digits, unit) = input.split_at(split);
        let count: u32 = digits.parse().map_err(|_| invalid())?;

        match unit.to_lowercase().as_str() {
            "" | "m" => Ok(Self::Months(count)),
            "y" => Ok(Self::Years(count)),
            _ => Err(invalid()),
        }
    }

    /// First day of the month the report starts in, never before `earliest`
    pub fn start_date(&self, today: NaiveDate, earliest: NaiveDate) -> NaiveDate {
        let start = match self {
            Self::All => None,
            Self::Months(count) => today.checked_sub_months(Months::new(*count)),
            Self::Years(count) => count
                .checked_mul(12)
                .and_then(|months| today.checked_sub_months(Months::new(months))),
        };

        let start = match start {
            Some(start) if start > earliest => start,
            _ => earliest,
        };
        start.with_day(1).unwrap_or(start)
    }
}

impl FromStr for SincePeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SincePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Months(count) => write!(f, "{}m", count),
            Self::Years(count) => write!(f, "{}y", count),
        }
    }
}

/// Every (month, year) from `start` through `today`, both months included
pub fn months_in_range(start: NaiveDate, today: NaiveDate) -> Vec<(u32, i32)> {
    let mut months = Vec::new();
    let Some(mut cursor) = start.with_day(1) else {
        return months;
    };

    while (cursor.year(), cursor.month()) <= (today.year(), today.month()) {
        months.push((cursor.month(), cursor.year()));
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(SincePeriod::parse("").unwrap(), SincePeriod::All);
        assert_eq!(SincePeriod::parse("3").unwrap(), SincePeriod::Months(3));
        assert_eq!(SincePeriod::parse("4m").unwrap(), SincePeriod::Months(4));
        assert_eq!(SincePeriod::parse("2Y").unwrap(), SincePeriod::Years(2));
        assert_eq!("1y".parse::<SincePeriod>().unwrap(), SincePeriod::Years(1));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["m", "3w", "3mm", "-3", "three"] {
            assert!(matches!(
                SincePeriod::parse(input),
                Err(ValidationError::InvalidSincePeriod(_))
            ));
        }
    }

    #[test]
    fn test_start_date() {
        let earliest = date(2019, 6, 1);
        let today = date(2020, 8, 15);

        assert_eq!(SincePeriod::Months(2).start_date(today, earliest), date(2020, 6, 1));
        assert_eq!(SincePeriod::Years(1).start_date(today, earliest), date(2019, 8, 1));
        assert_eq!(SincePeriod::Years(5).start_date(today, earliest), earliest);
        assert_eq!(SincePeriod::All.start_date(today, earliest), earliest);
    }

    #[test]
    fn test_months_in_range_includes_current_month() {
        let months = months_in_range(date(2020, 11, 20), date(2021, 2, 3));
        assert_eq!(months, vec![(11, 2020), (12, 2020), (1, 2021), (2, 2021)]);
    }

    #[test]
    fn test_months_in_range_start_after_today() {
        assert!(months_in_range(date(2021, 3, 1), date(2021, 2, 28)).is_empty());
    }
}
