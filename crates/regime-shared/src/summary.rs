//! Deterministic statistical summary of a selected period.
//!
//! The summary is the only ground truth the model is shown, and the only
//! reference the validator checks against.
//!
//! # Rules
//!
//! - **Means**: arithmetic mean of non-null values, rounded once to 2 decimals
//! - **Real rate sign**: negative iff the rounded mean is < 0 (zero is positive)
//! - **Curve shape**: inverted iff the rounded spread is < 0 (zero is upward sloping)
//! - **Dominant regime**: mode of the regime column, smallest id wins ties

use crate::error::SummaryError;
use crate::record::FeatureRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Sign of the average real policy rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RealRateSign {
    Positive,
    Negative,
}

impl RealRateSign {
    pub fn from_rate(avg_real_policy_rate: f64) -> Self {
        if avg_real_policy_rate < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for RealRateSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the yield curve implied by the average spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldCurveShape {
    Inverted,
    UpwardSloping,
}

impl YieldCurveShape {
    pub fn from_spread(avg_yield_spread: f64) -> Self {
        if avg_yield_spread < 0.0 {
            Self::Inverted
        } else {
            Self::UpwardSloping
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inverted => "inverted",
            Self::UpwardSloping => "upward_sloping",
        }
    }
}

impl fmt::Display for YieldCurveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed summary of one selected period.
///
/// Fields are private so the qualitative labels can never disagree with the
/// averages they are derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    start_date: NaiveDate,
    end_date: NaiveDate,
    avg_real_policy_rate: f64,
    avg_inflation: f64,
    avg_yield_spread: f64,
    real_rate_sign: RealRateSign,
    yield_curve_shape: YieldCurveShape,
    dominant_regime: u32,
}

impl Summary {
    /// Build a summary from period bounds and averages.
    ///
    /// Averages are rounded to 2 decimals here; labels are derived from the
    /// rounded values.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        avg_real_policy_rate: f64,
        avg_inflation: f64,
        avg_yield_spread: f64,
        dominant_regime: u32,
    ) -> Self {
        let avg_real_policy_rate = round2(avg_real_policy_rate);
        let avg_yield_spread = round2(avg_yield_spread);
        Self {
            start_date,
            end_date,
            avg_real_policy_rate,
            avg_inflation: round2(avg_inflation),
            avg_yield_spread,
            real_rate_sign: RealRateSign::from_rate(avg_real_policy_rate),
            yield_curve_shape: YieldCurveShape::from_spread(avg_yield_spread),
            dominant_regime,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn avg_real_policy_rate(&self) -> f64 {
        self.avg_real_policy_rate
    }

    pub fn avg_inflation(&self) -> f64 {
        self.avg_inflation
    }

    pub fn avg_yield_spread(&self) -> f64 {
        self.avg_yield_spread
    }

    pub fn real_rate_sign(&self) -> RealRateSign {
        self.real_rate_sign
    }

    pub fn yield_curve_shape(&self) -> YieldCurveShape {
        self.yield_curve_shape
    }

    pub fn dominant_regime(&self) -> u32 {
        self.dominant_regime
    }
}

/// Reduce a selected slice to its summary.
///
/// Fails with [`SummaryError::EmptySelection`] before doing any work when the
/// slice has no rows, and with [`SummaryError::MissingMetric`] when a column
/// the summary needs has no values in the slice.
pub fn summarize(slice: &[&FeatureRecord]) -> Result<Summary, SummaryError> {
    if slice.is_empty() {
        return Err(SummaryError::EmptySelection);
    }

    let start_date = slice.iter().map(|r| r.date).min();
    let end_date = slice.iter().map(|r| r.date).max();
    let (Some(start_date), Some(end_date)) = (start_date, end_date) else {
        return Err(SummaryError::EmptySelection);
    };

    let avg_real = mean(slice.iter().filter_map(|r| r.real_policy_rate))
        .ok_or(SummaryError::MissingMetric {
            metric: "real_policy_rate",
        })?;
    let avg_inflation = mean(slice.iter().filter_map(|r| r.inflation_yoy)).ok_or(
        SummaryError::MissingMetric {
            metric: "inflation_yoy",
        },
    )?;
    let avg_spread = mean(slice.iter().filter_map(|r| r.yield_spread)).ok_or(
        SummaryError::MissingMetric {
            metric: "yield_spread",
        },
    )?;
    let regime = dominant_regime(slice.iter().filter_map(|r| r.regime))
        .ok_or(SummaryError::MissingMetric { metric: "regime" })?;

    Ok(Summary::new(
        start_date,
        end_date,
        avg_real,
        avg_inflation,
        avg_spread,
        regime,
    ))
}

/// Mode of the regime labels; ties go to the smallest id.
pub fn dominant_regime(labels: impl IntoIterator<Item = u32>) -> Option<u32> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    // BTreeMap iterates ascending, so keeping only strictly greater counts
    // leaves the smallest id among the tied maxima.
    let mut best: Option<(u32, usize)> = None;
    for (label, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// Round half away from zero to 2 decimals, folding `-0.0` into `0.0`.
fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn row(m: u32, real: Option<f64>, spread: f64, regime: Option<u32>) -> FeatureRecord {
        FeatureRecord {
            date: date(2008, m),
            fed_funds_rate: 2.0,
            treasury_10y_rate: Some(2.0 + spread),
            yield_spread: Some(spread),
            inflation_yoy: real.map(|r| 2.0 - r),
            real_policy_rate: real,
            housing_starts: Some(1000.0),
            regime,
        }
    }

    #[test]
    fn test_empty_slice_fails() {
        assert_eq!(summarize(&[]), Err(SummaryError::EmptySelection));
    }

    #[test]
    fn test_round_aggregate_once() {
        let rows = [
            row(1, Some(1.005), 0.5, Some(0)),
            row(2, Some(1.015), 0.5, Some(0)),
        ];
        let slice: Vec<_> = rows.iter().collect();
        let summary = summarize(&slice).unwrap();
        assert_eq!(summary.avg_real_policy_rate(), 1.01);
    }

    #[test]
    fn test_nulls_excluded_from_means() {
        let rows = [
            row(1, None, 1.0, None),
            row(2, Some(-1.0), 1.0, Some(1)),
            row(3, Some(-3.0), 1.0, Some(1)),
        ];
        let slice: Vec<_> = rows.iter().collect();
        let summary = summarize(&slice).unwrap();
        assert_eq!(summary.avg_real_policy_rate(), -2.0);
        assert_eq!(summary.dominant_regime(), 1);
        assert_eq!(summary.start_date(), date(2008, 1));
        assert_eq!(summary.end_date(), date(2008, 3));
    }

    #[test]
    fn test_all_null_metric_fails() {
        let rows = [row(1, None, 1.0, Some(0))];
        let slice: Vec<_> = rows.iter().collect();
        assert_eq!(
            summarize(&slice),
            Err(SummaryError::MissingMetric {
                metric: "real_policy_rate"
            })
        );
    }

    #[test]
    fn test_zero_boundaries() {
        let s = Summary::new(date(2008, 1), date(2008, 12), 0.0, 2.0, 0.0, 0);
        assert_eq!(s.real_rate_sign(), RealRateSign::Positive);
        assert_eq!(s.yield_curve_shape(), YieldCurveShape::UpwardSloping);

        // Rounds to zero, so the label follows the rounded value.
        let s = Summary::new(date(2008, 1), date(2008, 12), -0.004, 2.0, -0.001, 0);
        assert_eq!(s.avg_real_policy_rate(), 0.0);
        assert!(s.avg_real_policy_rate().is_sign_positive());
        assert_eq!(s.real_rate_sign(), RealRateSign::Positive);
        assert_eq!(s.yield_curve_shape(), YieldCurveShape::UpwardSloping);
    }

    #[test]
    fn test_negative_labels() {
        let s = Summary::new(date(2008, 1), date(2008, 12), -2.1, 3.8, -0.5, 2);
        assert_eq!(s.real_rate_sign(), RealRateSign::Negative);
        assert_eq!(s.yield_curve_shape(), YieldCurveShape::Inverted);
    }

    #[test]
    fn test_mode_tie_prefers_smallest_id() {
        assert_eq!(dominant_regime([2, 1, 2, 1, 0]), Some(1));
        assert_eq!(dominant_regime([2, 2, 0]), Some(2));
        assert_eq!(dominant_regime(std::iter::empty()), None);
    }

    #[test]
    fn test_serialized_labels() {
        let s = Summary::new(date(2008, 1), date(2008, 12), -2.1, 3.8, 0.4, 2);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["real_rate_sign"], "negative");
        assert_eq!(json["yield_curve_shape"], "upward_sloping");
        assert_eq!(json["start_date"], "2008-01-01");
    }
}
