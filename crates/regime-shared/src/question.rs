//! Year extraction from free-text questions.
//!
//! Any standalone 4-digit token in 1900-2099 counts as a year. A non-year
//! number in that band ("a 2000 basis point move") is indistinguishable from
//! a year and will narrow the selection. This is a known limitation.

use crate::record::YearRange;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static YEAR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("year pattern is valid"));

/// Extract the temporal filter implied by a question.
///
/// - two or more distinct years: `(min, max)`, whatever order they appear in
/// - exactly one year: `(year, year)`
/// - none: `None`, meaning the full series
pub fn extract_years(question: &str) -> Option<YearRange> {
    let years: BTreeSet<i32> = YEAR_TOKEN
        .find_iter(question)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    let first = *years.first()?;
    let last = *years.last()?;
    Some(YearRange::new(first, last))
}
