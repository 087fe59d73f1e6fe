use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::metrics::{round1, AnalysisSnapshot, MetricName};
use crate::summary::summarize;

/// Change of one metric between two snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaReport {
    pub metric: MetricName,
    pub previous: f64,
    pub current: f64,
    pub difference: f64,
    pub percentage_change: f64,
    pub improvement: bool,
}

impl DeltaReport {
    fn new(
        metric: MetricName,
        previous: f64,
        current: f64,
        higher_is_better: bool,
    ) -> Result<Self, ValidationError> {
        let previous = round1(previous);
        let current = round1(current);
        // Re-rounded so float noise from the subtraction does not leak out
        let difference = round1(current - previous);

        // Zero baseline has no meaningful relative change
        let percentage_change = if previous == 0.0 {
            0.0
        } else {
            round1(difference / previous * 100.0)
        };

        // Huge finite inputs can still overflow once scaled or subtracted
        if ![previous, current, difference, percentage_change]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ValidationError::Overflow { metric });
        }

        let improvement = if higher_is_better {
            difference > 0.0
        } else {
            difference < 0.0
        };

        Ok(Self {
            metric,
            previous,
            current,
            difference,
            percentage_change,
            improvement,
        })
    }
}

/// Compare two snapshots metric by metric, in canonical order.
///
/// Both snapshots must hold every metric exactly once with a finite value,
/// and agree on the polarity of each metric.
pub fn compare(
    previous: &AnalysisSnapshot,
    current: &AnalysisSnapshot,
) -> Result<Vec<DeltaReport>, ValidationError> {
    previous.validate("previous")?;
    current.validate("current")?;

    let mut reports = Vec::with_capacity(MetricName::ALL.len());
    for metric in MetricName::ALL {
        let before = previous.get(metric).ok_or(ValidationError::MissingMetric {
            snapshot: "previous",
            metric,
        })?;
        let after = current.get(metric).ok_or(ValidationError::MissingMetric {
            snapshot: "current",
            metric,
        })?;
        if before.higher_is_better != after.higher_is_better {
            return Err(ValidationError::PolarityMismatch { metric });
        }

        let report =
            DeltaReport::new(metric, before.value, after.value, after.higher_is_better)?;
        debug!(
            "{}: {} -> {} ({:+}, {}%)",
            metric, report.previous, report.current, report.difference, report.percentage_change
        );
        reports.push(report);
    }

    Ok(reports)
}

/// Delta reports together with their human readable summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub reports: Vec<DeltaReport>,
    pub summary: Vec<String>,
}

impl Comparison {
    pub fn between(
        previous: &AnalysisSnapshot,
        current: &AnalysisSnapshot,
    ) -> Result<Self, ValidationError> {
        let reports = compare(previous, current)?;
        let summary = summarize(&reports);
        Ok(Self { reports, summary })
    }

    /// Number of metrics that moved in the favourable direction
    pub fn improved_count(&self) -> usize {
        self.reports.iter().filter(|r| r.improvement).count()
    }
}
