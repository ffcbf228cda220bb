//! Inclusive letter-date range parsed from a `start,end` string.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Inclusive date range `[start, end]`.
///
/// Dates stay strings: bounds are compared lexicographically against
/// `letter_date`, which orders correctly for ISO `YYYY-MM-DD` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: String,
    pub end: String,
}

impl TimeSpan {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self, AppError> {
        let start = start.into().trim().to_string();
        let end = end.into().trim().to_string();
        if start.is_empty() || end.is_empty() || start > end {
            return Err(AppError::InvalidTimeSpan(format!("{},{}", start, end)));
        }
        Ok(Self { start, end })
    }

    /// Whether `date` lies within the span, boundaries included.
    pub fn contains(&self, date: &str) -> bool {
        self.start.as_str() <= date && date <= self.end.as_str()
    }

    /// Title fragment: `X and Y`.
    pub fn title_label(&self) -> String {
        format!("{} and {}", self.start, self.end)
    }

    /// File-name fragment: `X, Y`.
    pub fn file_label(&self) -> String {
        format!("{}, {}", self.start, self.end)
    }
}

impl FromStr for TimeSpan {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split(',').collect::<Vec<_>>().as_slice() {
            [start, end] => Self::new(*start, *end),
            _ => Err(AppError::InvalidTimeSpan(s.to_string())),
        }
    }
}

impl std::fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_bounds() {
        let span: TimeSpan = "1800-01-01, 1800-12-31".parse().unwrap();
        assert_eq!(span.start, "1800-01-01");
        assert_eq!(span.end, "1800-12-31");
        assert_eq!(span.title_label(), "1800-01-01 and 1800-12-31");
        assert_eq!(span.file_label(), "1800-01-01, 1800-12-31");
    }

    #[test]
    fn test_contains_is_inclusive() {
        let span: TimeSpan = "1800-01-01,1800-02-01".parse().unwrap();
        assert!(span.contains("1800-01-01"));
        assert!(span.contains("1800-01-15"));
        assert!(span.contains("1800-02-01"));
        assert!(!span.contains("1799-12-31"));
        assert!(!span.contains("1800-02-02"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("1800-01-01".parse::<TimeSpan>().is_err());
        assert!("a,b,c".parse::<TimeSpan>().is_err());
        assert!(" ,1800-01-01".parse::<TimeSpan>().is_err());
        assert!("1801-01-01,1800-01-01".parse::<TimeSpan>().is_err());
    }
}
