//! Error types for the pure pipeline stages.

use thiserror::Error;

/// Why a selection could not be reduced to a summary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("No data available for the specified period.")]
    EmptySelection,

    #[error("No {metric} values available for the specified period.")]
    MissingMetric { metric: &'static str },
}
