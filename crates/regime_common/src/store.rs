//! Read-only feature store.
//!
//! The feature table is produced upstream (cleaning, feature arithmetic,
//! regime clustering) and loaded once per process. Nothing mutates it after
//! load, so it can be shared freely across questions.

use crate::error::StoreError;
use chrono::NaiveDate;
use regime_shared::FeatureRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// Date format written by the upstream feature builder
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw CSV row. Nullable integer columns arrive as floats ("2.0").
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    fed_funds_rate: f64,
    treasury_10y_rate: Option<f64>,
    yield_spread: Option<f64>,
    inflation_yoy: Option<f64>,
    real_policy_rate: Option<f64>,
    housing_starts: Option<f64>,
    regime: Option<f64>,
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<FeatureRecord, StoreError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|e| {
            StoreError::Row {
                row,
                message: format!("bad date '{}': {}", self.date, e),
            }
        })?;

        let regime = match self.regime {
            None => None,
            Some(v) if v.is_nan() => None,
            Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => Some(v as u32),
            Some(v) => {
                return Err(StoreError::Row {
                    row,
                    message: format!("regime must be a non-negative integer, got {}", v),
                })
            }
        };

        Ok(FeatureRecord {
            date,
            fed_funds_rate: self.fed_funds_rate,
            treasury_10y_rate: self.treasury_10y_rate,
            yield_spread: self.yield_spread,
            inflation_yoy: self.inflation_yoy,
            real_policy_rate: self.real_policy_rate,
            housing_starts: self.housing_starts,
            regime,
        })
    }
}

/// Immutable, chronologically ordered feature table.
#[derive(Debug, Clone)]
pub struct FeatureStore {
    records: Vec<FeatureRecord>,
}

impl FeatureStore {
    /// Load the feature table from CSV.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut records = Vec::new();
        for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = idx + 1;
            let raw = result.map_err(|e| StoreError::Row {
                row,
                message: e.to_string(),
            })?;
            records.push(raw.into_record(row)?);
        }

        if records.is_empty() {
            return Err(StoreError::Empty {
                path: path.to_path_buf(),
            });
        }

        let store = Self::from_records(records);
        info!(
            "Loaded {} feature rows from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Wrap rows already in memory.
    pub fn from_records(records: Vec<FeatureRecord>) -> Self {
        if !records.windows(2).all(|w| w[0].date <= w[1].date) {
            warn!("Feature rows are not in chronological order; keeping source order");
        }
        Self { records }
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Coverage and label counts for a quick look at the table.
    pub fn overview(&self) -> StoreOverview {
        let mut regime_counts = BTreeMap::new();
        let mut unlabelled = 0;
        for r in &self.records {
            match r.regime {
                Some(id) => *regime_counts.entry(id).or_default() += 1,
                None => unlabelled += 1,
            }
        }

        StoreOverview {
            rows: self.records.len(),
            first_date: self.records.iter().map(|r| r.date).min(),
            last_date: self.records.iter().map(|r| r.date).max(),
            missing_inflation: self
                .records
                .iter()
                .filter(|r| r.inflation_yoy.is_none())
                .count(),
            unlabelled,
            regime_counts,
        }
    }
}

/// Summary of what the store holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreOverview {
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Rows without year-over-year inflation (the leading lag window)
    pub missing_inflation: usize,
    /// Rows the clustering step did not label
    pub unlabelled: usize,
    /// Rows per regime id, ascending by id
    pub regime_counts: BTreeMap<u32, usize>,
}

impl fmt::Display for StoreOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {}", self.rows)?;
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => writeln!(f, "period: {} to {}", first, last)?,
            _ => writeln!(f, "period: n/a")?,
        }
        writeln!(f, "missing inflation: {}", self.missing_inflation)?;
        writeln!(f, "unlabelled: {}", self.unlabelled)?;
        writeln!(f, "regime counts:")?;
        for (id, count) in &self.regime_counts {
            writeln!(f, "  {}\t{}", id, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "date,fed_funds_rate,treasury_10y_rate,yield_spread,inflation_yoy,real_policy_rate,housing_starts,regime";

    fn write_csv(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        write!(file, "{}", body).unwrap();
        file
    }

    #[test]
    fn test_load_with_nulls_and_float_regimes() {
        let file = write_csv(
            "1954-07-01,0.8,2.3,1.5,,,1200,\n\
             1955-07-01,1.68,2.85,1.17,-0.37,2.05,1350,2.0\n\
             1955-08-01,1.96,2.9,0.94,-0.37,2.33,1300,1\n",
        );
        let store = FeatureStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 3);

        let first = &store.records()[0];
        assert_eq!(first.inflation_yoy, None);
        assert_eq!(first.real_policy_rate, None);
        assert_eq!(first.regime, None);

        let second = &store.records()[1];
        assert_eq!(second.regime, Some(2));
        assert_eq!(second.date, NaiveDate::from_ymd_opt(1955, 7, 1).unwrap());
    }

    #[test]
    fn test_bad_date_reports_row() {
        let file = write_csv("2008-01-01,3.0,3.7,0.7,4.3,-1.3,1000,1\n2008/02/01,3.0,3.7,0.7,4.3,-1.3,1000,1\n");
        let err = FeatureStore::load(file.path()).unwrap_err();
        match err {
            StoreError::Row { row, message } => {
                assert_eq!(row, 2);
                assert!(message.contains("bad date"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fractional_regime_rejected() {
        let file = write_csv("2008-01-01,3.0,3.7,0.7,4.3,-1.3,1000,1.5\n");
        assert!(matches!(
            FeatureStore::load(file.path()),
            Err(StoreError::Row { row: 1, .. })
        ));
    }

    #[test]
    fn test_empty_table_rejected() {
        let file = write_csv("");
        assert!(matches!(
            FeatureStore::load(file.path()),
            Err(StoreError::Empty { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = FeatureStore::load(Path::new("/nonexistent/features.csv")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn test_overview_counts() {
        let file = write_csv(
            "2007-12-01,4.2,4.1,-0.1,,,1000,\n\
             2008-01-01,3.9,3.7,-0.2,4.3,-0.4,1000,1\n\
             2008-02-01,3.0,3.7,0.7,4.0,-1.0,1000,0\n\
             2008-03-01,2.6,3.5,0.9,4.0,-1.4,1000,1\n",
        );
        let overview = FeatureStore::load(file.path()).unwrap().overview();
        assert_eq!(overview.rows, 4);
        assert_eq!(overview.missing_inflation, 1);
        assert_eq!(overview.unlabelled, 1);
        assert_eq!(
            overview.regime_counts.into_iter().collect::<Vec<_>>(),
            vec![(0, 1), (1, 2)]
        );
        assert_eq!(
            overview.first_date,
            Some(NaiveDate::from_ymd_opt(2007, 12, 1).unwrap())
        );
    }
}
