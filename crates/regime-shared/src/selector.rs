//! Temporal selection over the feature table.

use crate::record::{FeatureRecord, YearRange};

/// Rows whose calendar year falls inside `range`, in table order.
///
/// `None` selects the whole table. The result borrows from `records`.
pub fn filter<'a>(records: &'a [FeatureRecord], range: Option<YearRange>) -> Vec<&'a FeatureRecord> {
    match range {
        None => records.iter().collect(),
        Some(range) => records.iter().filter(|r| range.contains(r.date)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(y: i32, m: u32) -> FeatureRecord {
        FeatureRecord {
            date: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            fed_funds_rate: 1.0,
            treasury_10y_rate: Some(2.0),
            yield_spread: Some(1.0),
            inflation_yoy: Some(2.0),
            real_policy_rate: Some(-1.0),
            housing_starts: Some(1200.0),
            regime: Some(0),
        }
    }

    fn table() -> Vec<FeatureRecord> {
        (2006..=2010)
            .flat_map(|y| [1, 6, 12].map(|m| row(y, m)))
            .collect()
    }

    #[test]
    fn test_no_range_returns_everything() {
        let rows = table();
        assert_eq!(filter(&rows, None).len(), rows.len());
    }

    #[test]
    fn test_single_year() {
        let rows = table();
        let slice = filter(&rows, Some(YearRange::single(2008)));
        assert_eq!(slice.len(), 3);
        assert!(slice.iter().all(|r| r.year() == 2008));
    }

    #[test]
    fn test_multi_year_preserves_order() {
        let rows = table();
        let slice = filter(&rows, Some(YearRange::new(2009, 2007)));
        assert_eq!(slice.len(), 9);
        assert!(slice.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(slice.first().unwrap().year(), 2007);
        assert_eq!(slice.last().unwrap().year(), 2009);
    }

    #[test]
    fn test_range_outside_table_is_empty() {
        let rows = table();
        assert!(filter(&rows, Some(YearRange::single(1950))).is_empty());
    }
}
