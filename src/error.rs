use std::path::PathBuf;
use thiserror::Error;

use crate::metrics::MetricName;

/// Rejection of a snapshot that cannot be compared
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{snapshot} snapshot is missing {metric}")]
    MissingMetric {
        snapshot: &'static str,
        metric: MetricName,
    },

    #[error("{snapshot} snapshot contains {metric} more than once")]
    DuplicateMetric {
        snapshot: &'static str,
        metric: MetricName,
    },

    #[error("{snapshot} snapshot has a non-finite value for {metric}: {value}")]
    NonFinite {
        snapshot: &'static str,
        metric: MetricName,
        value: f64,
    },

    #[error("{metric} overflows when compared")]
    Overflow { metric: MetricName },

    #[error("snapshots disagree on whether higher is better for {metric}")]
    PolarityMismatch { metric: MetricName },
}

/// Failure of the mock analysis of a recording
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("recording {0} is empty")]
    EmptyRecording(String),

    #[error("recording {file_name} is {size} bytes, over the {limit} byte limit")]
    FileTooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read recording {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
