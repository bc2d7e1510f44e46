//! Error types for regime.

use regime_shared::{SummaryError, YearRange};
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the feature table.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot read feature table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed feature row {row}: {message}")]
    Row { row: usize, message: String },

    #[error("Feature table {path} has no rows")]
    Empty { path: PathBuf },
}

/// Failures of one question-answering run.
#[derive(Error, Debug)]
pub enum RegimeError {
    #[error("No data available for {}.", describe_range(.range))]
    EmptySelection { range: Option<YearRange> },

    #[error(transparent)]
    Summary(SummaryError),

    #[error("Inference executable {binary} could not be started: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Inference failed (exit {}): {stderr}", describe_code(.exit_code))]
    Inference {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Inference timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegimeError {
    /// Attach the requested range to a summarization failure.
    pub fn from_summary(err: SummaryError, range: Option<YearRange>) -> Self {
        match err {
            SummaryError::EmptySelection => Self::EmptySelection { range },
            other => Self::Summary(other),
        }
    }
}

/// Failures while reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn describe_range(range: &Option<YearRange>) -> String {
    match range {
        Some(r) => format!("the specified period ({})", r),
        None => "the specified period".to_string(),
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_message_names_range() {
        let err = RegimeError::from_summary(
            SummaryError::EmptySelection,
            Some(YearRange::new(1950, 1951)),
        );
        assert_eq!(
            err.to_string(),
            "No data available for the specified period (1950-1951)."
        );
    }

    #[test]
    fn test_missing_metric_passes_through() {
        let err = RegimeError::from_summary(
            SummaryError::MissingMetric { metric: "regime" },
            None,
        );
        assert!(matches!(err, RegimeError::Summary(_)));
        assert_eq!(
            err.to_string(),
            "No regime values available for the specified period."
        );
    }

    #[test]
    fn test_inference_message_carries_stderr() {
        let err = RegimeError::Inference {
            exit_code: Some(1),
            stderr: "model not found".to_string(),
        };
        assert_eq!(err.to_string(), "Inference failed (exit 1): model not found");
    }
}
