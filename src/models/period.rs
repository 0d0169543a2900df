//! Calendar month period
//!
//! Periods are the aggregation bucket for every report. They display and
//! parse as `YYYY-MM` and serialize the same way.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar year-month (e.g., "2025-08")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, validating the month
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The period a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current period in local time
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Move forward by a number of months
    pub fn advance(&self, months: u32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// The `count` periods ending at `end`, oldest first
    pub fn trailing(end: Period, count: usize) -> Vec<Period> {
        let mut periods = Vec::with_capacity(count);
        let mut current = end;
        for _ in 0..count {
            periods.push(current);
            current = current.prev();
        }
        periods.reverse();
        periods
    }

    /// Parse a period string in `YYYY-MM` form
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn test_navigation() {
        assert_eq!(period(2025, 1).next(), period(2025, 2));
        assert_eq!(period(2024, 12).next(), period(2025, 1));
        assert_eq!(period(2025, 1).prev(), period(2024, 12));
    }

    #[test]
    fn test_advance() {
        assert_eq!(period(2025, 8).advance(0), period(2025, 8));
        assert_eq!(period(2025, 8).advance(5), period(2026, 1));
        assert_eq!(period(2025, 8).advance(29), period(2028, 1));
    }

    #[test]
    fn test_contains() {
        let aug = period(2025, 8);
        assert!(aug.contains(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()));
        assert!(!aug.contains(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()));
        assert!(!aug.contains(NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()));
    }

    #[test]
    fn test_trailing() {
        let periods = Period::trailing(period(2025, 2), 4);
        assert_eq!(
            periods,
            vec![period(2024, 11), period(2024, 12), period(2025, 1), period(2025, 2)]
        );
        assert!(Period::trailing(period(2025, 2), 0).is_empty());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Period::parse("2025-08").unwrap(), period(2025, 8));
        assert_eq!(Period::parse(" 2025-8 ").unwrap(), period(2025, 8));
        assert_eq!(period(2025, 8).to_string(), "2025-08");
        assert_eq!(
            Period::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(matches!(
            Period::parse("August"),
            Err(PeriodParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_ordering() {
        assert!(period(2024, 12) < period(2025, 1));
        assert!(period(2025, 2) > period(2025, 1));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&period(2025, 8)).unwrap();
        assert_eq!(json, "\"2025-08\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period(2025, 8));
        assert!(serde_json::from_str::<Period>("\"2025-00\"").is_err());
    }
}
