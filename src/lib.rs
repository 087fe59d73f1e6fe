// Library exports for integration testing and binary
pub mod analysis;
pub mod compare;
pub mod config;
pub mod error;
pub mod metrics;
pub mod recommend;
pub mod report;
pub mod summary;
pub mod web;

pub use compare::{compare, Comparison, DeltaReport};
pub use error::{AnalysisError, ValidationError};
pub use metrics::{AnalysisSnapshot, MetricName, MetricSample};
pub use summary::summarize;
