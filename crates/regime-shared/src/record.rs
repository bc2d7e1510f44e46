//! Feature table rows and temporal ranges.
//!
//! Rows are produced upstream (cleaning, feature arithmetic, clustering) and
//! consumed read-only by the pipeline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One monthly observation of the macro feature table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// First day of the observed month
    pub date: NaiveDate,
    pub fed_funds_rate: f64,
    pub treasury_10y_rate: Option<f64>,
    /// 10-year yield minus the nominal policy rate
    pub yield_spread: Option<f64>,
    /// Year-over-year CPI change; blank for the first 12 periods
    pub inflation_yoy: Option<f64>,
    /// Policy rate minus trailing inflation; inherits the inflation lag
    pub real_policy_rate: Option<f64>,
    pub housing_starts: Option<f64>,
    /// Opaque cluster id. No ordinal meaning.
    pub regime: Option<u32>,
}

impl FeatureRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Inclusive calendar-year range.
///
/// Constructed through [`YearRange::new`], which orders the bounds so that
/// `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Range covering a single calendar year
    pub fn single(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date.year())
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_range_orders_bounds() {
        let range = YearRange::new(2009, 2007);
        assert_eq!(range.start(), 2007);
        assert_eq!(range.end(), 2009);
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = YearRange::new(2007, 2009);
        assert!(range.contains(date(2007, 1)));
        assert!(range.contains(date(2009, 12)));
        assert!(!range.contains(date(2006, 12)));
        assert!(!range.contains(date(2010, 1)));
    }

    #[test]
    fn test_range_display() {
        assert_eq!(YearRange::single(2008).to_string(), "2008");
        assert_eq!(YearRange::new(2001, 2003).to_string(), "2001-2003");
    }
}
