//! Plain-text rendering for the command line

use crate::analysis::AnalysisResult;
use crate::compare::Comparison;
use crate::metrics::MetricName;

/// One decimal place plus the unit of the metric
pub fn format_value(metric: MetricName, value: f64) -> String {
    format!("{:.1}{}", value, metric.unit().suffix())
}

pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = format!(
        "{} ({}, {} bytes, {}s)\n",
        result.file_name, result.format, result.file_size, result.duration_secs
    );
    for sample in result.snapshot.samples() {
        out.push_str(&format!(
            "  {:<16} {:>9}\n",
            sample.name.label(),
            format_value(sample.name, sample.value)
        ));
    }

    if !result.recommendations.is_empty() {
        out.push_str("Recommendations:\n");
        for rec in &result.recommendations {
            out.push_str(&format!("  [{:?}] {}\n", rec.priority, rec.title));
            out.push_str(&format!("      {}\n", rec.description));
        }
    }
    out
}

pub fn render_comparison(comparison: &Comparison) -> String {
    let mut out = format!(
        "  {:<16} {:>9} {:>9} {:>8} {:>8}\n",
        "Metric", "Before", "After", "Change", "%"
    );
    for report in &comparison.reports {
        out.push_str(&format!(
            "  {:<16} {:>9} {:>9} {:>+8.1} {:>+7.1}% {}\n",
            report.metric.label(),
            format_value(report.metric, report.previous),
            format_value(report.metric, report.current),
            report.difference,
            report.percentage_change,
            if report.improvement { "improved" } else { "" }
        ));
    }
    out.push('\n');
    for line in &comparison.summary {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::AnalysisSnapshot;

    #[test]
    fn test_format_value_units() {
        assert_eq!(format_value(MetricName::PitchAccuracy, 85.04), "85.0%");
        assert_eq!(format_value(MetricName::DynamicRange, 22.35), "22.4 dB");
    }

    #[test]
    fn test_render_analysis() {
        let snapshot = AnalysisSnapshot::new(70.0, 90.0, 90.0, 30.0);
        let result = AnalysisResult {
            file_name: "take.wav".to_string(),
            file_size: 1024,
            format: "WAV".to_string(),
            duration_secs: 95,
            analyzed_at: chrono::Utc::now(),
            recommendations: crate::recommend::recommend(&snapshot, 90.0, 1),
            snapshot,
            pitch_trace: vec![],
            rhythm_trace: vec![],
        };
        let text = render_analysis(&result);
        assert!(text.starts_with("take.wav (WAV, 1024 bytes, 95s)"));
        assert!(text.contains("70.0%"));
        assert!(text.contains("30.0 dB"));
        assert!(text.contains("[High] Improve pitch accuracy"));
    }

    #[test]
    fn test_render_comparison_lists_metrics_and_summary() {
        let previous = AnalysisSnapshot::new(70.0, 80.0, 75.0, 20.0);
        let current = AnalysisSnapshot::new(85.0, 80.0, 75.0, 20.0);
        let comparison = Comparison::between(&previous, &current).unwrap();
        let text = render_comparison(&comparison);

        for metric in MetricName::ALL {
            assert!(text.contains(metric.label()));
        }
        assert!(text.contains("improved"));
        assert!(text.contains("Pitch accuracy: from 70 to 85 (+15)"));
    }

    #[test]
    fn test_render_comparison_layout() {
        let previous = AnalysisSnapshot::new(70.0, 80.0, 75.0, 20.0);
        let current = AnalysisSnapshot::new(85.0, 80.0, 75.0, 20.0);
        let comparison = Comparison::between(&previous, &current).unwrap();
        let text = render_comparison(&comparison);
        let lines: Vec<&str> = text.lines().collect();

        // Header, one row per metric, blank separator, summary
        assert_eq!(lines.len(), 1 + 4 + 1 + comparison.summary.len());
        assert!(lines[0].trim_start().starts_with("Metric"));
        assert!(lines[1].contains("70.0%") && lines[1].contains("85.0%"));
        assert!(lines[4].contains("20.0 dB"));
        assert!(lines[5].is_empty());
        assert!(text.ends_with('\n'));
    }
}
