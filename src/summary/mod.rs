use crate::compare::DeltaReport;

/// Sole line returned when nothing improved
pub const NO_IMPROVEMENT_MESSAGE: &str = "No clear improvement was found between the two recordings. \
Keep practicing, with particular attention to pitch and rhythm.";

/// Turn delta reports into progress text.
///
/// Improved metrics are listed largest relative gain first; equal gains keep
/// their input order.
pub fn summarize(reports: &[DeltaReport]) -> Vec<String> {
    let mut improved: Vec<&DeltaReport> = reports.iter().filter(|r| r.improvement).collect();

    if improved.is_empty() {
        return vec![NO_IMPROVEMENT_MESSAGE.to_string()];
    }

    // sort_by is stable
    improved.sort_by(|a, b| {
        b.percentage_change
            .abs()
            .total_cmp(&a.percentage_change.abs())
    });

    let best = improved[0];
    let mut lines = Vec::with_capacity(improved.len() + 1);
    lines.push(format!(
        "Congratulations! You improved in {} {}; the biggest gain was {} ({}%).",
        improved.len(),
        if improved.len() == 1 { "area" } else { "areas" },
        best.metric,
        best.percentage_change.abs()
    ));

    for report in &improved {
        let sign = if report.difference > 0.0 { "+" } else { "" };
        lines.push(format!(
            "{}: from {} to {} ({}{})",
            report.metric, report.previous, report.current, sign, report.difference
        ));
    }

    lines
}
