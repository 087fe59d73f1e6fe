use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Performance dimensions measured for every recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    PitchAccuracy,
    RhythmAccuracy,
    VocalStability,
    DynamicRange,
}

impl MetricName {
    /// Canonical order used by comparisons and reports
    pub const ALL: [MetricName; 4] = [
        MetricName::PitchAccuracy,
        MetricName::RhythmAccuracy,
        MetricName::VocalStability,
        MetricName::DynamicRange,
    ];

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            MetricName::PitchAccuracy => "Pitch accuracy",
            MetricName::RhythmAccuracy => "Rhythm accuracy",
            MetricName::VocalStability => "Vocal stability",
            MetricName::DynamicRange => "Dynamic range",
        }
    }

    pub fn unit(self) -> MetricUnit {
        match self {
            MetricName::DynamicRange => MetricUnit::Decibels,
            _ => MetricUnit::Percent,
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Percent,
    Decibels,
}

impl MetricUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            MetricUnit::Percent => "%",
            MetricUnit::Decibels => " dB",
        }
    }
}

/// One scalar measurement taken from a single recording
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: MetricName,
    pub value: f64,
    #[serde(default = "default_higher_is_better")]
    pub higher_is_better: bool,
}

fn default_higher_is_better() -> bool {
    true
}

impl MetricSample {
    pub fn new(name: MetricName, value: f64) -> Self {
        Self {
            name,
            value,
            higher_is_better: true,
        }
    }
}

/// Every metric sample produced from one recording at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    samples: Vec<MetricSample>,
}

impl AnalysisSnapshot {
    /// Build a snapshot from the four measured values
    pub fn new(
        pitch_accuracy: f64,
        rhythm_accuracy: f64,
        vocal_stability: f64,
        dynamic_range: f64,
    ) -> Self {
        Self {
            samples: vec![
                MetricSample::new(MetricName::PitchAccuracy, pitch_accuracy),
                MetricSample::new(MetricName::RhythmAccuracy, rhythm_accuracy),
                MetricSample::new(MetricName::VocalStability, vocal_stability),
                MetricSample::new(MetricName::DynamicRange, dynamic_range),
            ],
        }
    }

    /// Build a snapshot from arbitrary samples; call `validate` before trusting it
    pub fn from_samples(samples: Vec<MetricSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    /// First sample recorded for `name`
    pub fn get(&self, name: MetricName) -> Option<&MetricSample> {
        self.samples.iter().find(|s| s.name == name)
    }

    /// Value of `name`, if present
    pub fn value(&self, name: MetricName) -> Option<f64> {
        self.get(name).map(|s| s.value)
    }

    /// Check that every metric appears exactly once with a finite value.
    /// `label` names the snapshot in error messages ("previous", "current").
    pub fn validate(&self, label: &'static str) -> Result<(), ValidationError> {
        for metric in MetricName::ALL {
            let mut matches = self.samples.iter().filter(|s| s.name == metric);
            let sample = matches.next().ok_or(ValidationError::MissingMetric {
                snapshot: label,
                metric,
            })?;
            if matches.next().is_some() {
                return Err(ValidationError::DuplicateMetric {
                    snapshot: label,
                    metric,
                });
            }
            if !sample.value.is_finite() {
                return Err(ValidationError::NonFinite {
                    snapshot: label,
                    metric,
                    value: sample.value,
                });
            }
        }
        Ok(())
    }
}

/// Round to one decimal place, halves away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
