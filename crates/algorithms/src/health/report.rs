//! Plain-text rendering of a [`HealthReport`]

use std::fmt;

use super::analyzer::HealthReport;
use crate::timeseries::{SampleOrigin, TimePoint, TimeSeries};

const RULE_WIDTH: usize = 50;

/// Render `report` for the terminal.
///
/// `series` must be the series the report was computed from; anomaly
/// periods and the monthly trend table are looked up in it.
pub fn render_report(report: &HealthReport, series: &TimeSeries) -> String {
    ReportText { report, series }.to_string()
}

struct ReportText<'a> {
    report: &'a HealthReport,
    series: &'a TimeSeries,
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(out, self.report, self.series)
    }
}

fn write_report(
    out: &mut fmt::Formatter<'_>,
    report: &HealthReport,
    series: &TimeSeries,
) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(out, "VEGETATION HEALTH ANALYSIS REPORT")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "Mean index: {:.4}", report.mean_index)?;
    writeln!(out, "Index spread (mean std dev): {:.4}", report.mean_spread)?;
    writeln!(out, "Latest index: {:.4}", report.latest_index)?;
    writeln!(out, "Vegetation health status: {}", report.status)?;

    if report.anomalies.is_empty() {
        writeln!(out, "\nNo significant anomalies detected in the vegetation health.")?;
    } else {
        writeln!(out, "\nDETECTED ANOMALIES:")?;
        for event in &report.anomalies {
            let period = match event.period(series) {
                Some((from, to)) => format!("{} to {}", from, to),
                None => format!("#{} to #{}", event.older, event.newer),
            };
            writeln!(
                out,
                "- {}: Significant {} in vegetation ({} severity, {:+.4})",
                period,
                event.trend(),
                event.severity,
                event.delta
            )?;
        }
    }

    writeln!(out, "\nMONTHLY TREND (oldest first):")?;
    let low = report.mean_index - report.mean_spread;
    let high = report.mean_index + report.mean_spread;
    for point in series.chronological() {
        writeln!(out, "  {}", trend_row(point, low, high))?;
    }
    writeln!(
        out,
        "  normal range (mean ± 1 std dev): {:.4} .. {:.4}",
        low, high
    )
}

fn trend_row(point: &TimePoint, low: f64, high: f64) -> String {
    let mean = point.mean();
    let band = if mean > high {
        "above"
    } else if mean < low {
        "below"
    } else {
        "within"
    };
    let origin = match point.origin {
        SampleOrigin::Fetched => "",
        SampleOrigin::Fallback => "  [fallback]",
    };
    format!("{}  {:>8.4}  {} normal range{}", point.date, mean, band, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{analyze, AnalyzerParams};
    use chrono::NaiveDate;
    use vegwatch_core::Raster;

    fn point(month: u32, values: Vec<f64>, origin: SampleOrigin) -> TimePoint {
        let date = NaiveDate::from_ymd_opt(2025, month, 28).unwrap();
        let n = values.len();
        TimePoint::new(date, Raster::from_vec(values, 1, n).unwrap(), origin)
    }

    #[test]
    fn test_report_lists_anomaly_with_dates() {
        let series = TimeSeries::from_points(vec![
            point(1, vec![0.1, 0.3], SampleOrigin::Fetched),
            point(2, vec![0.1, 0.3], SampleOrigin::Fallback),
            point(3, vec![0.5, 0.7], SampleOrigin::Fetched),
        ])
        .unwrap();
        let report = analyze(&series, &AnalyzerParams::default()).unwrap();
        let text = render_report(&report, &series);

        assert!(text.contains("VEGETATION HEALTH ANALYSIS REPORT"));
        assert!(text.contains("Vegetation health status: Excellent"));
        assert!(text.contains(
            "- 2025-02-28 to 2025-03-28: Significant increase in vegetation (High severity"
        ));
        assert!(text.contains("[fallback]"));
        assert!(!text.contains("No significant anomalies"));
    }

    #[test]
    fn test_report_without_anomalies() {
        let series =
            TimeSeries::from_points(vec![point(4, vec![0.2, 0.4], SampleOrigin::Fetched)])
                .unwrap();
        let report = analyze(&series, &AnalyzerParams::default()).unwrap();
        let text = render_report(&report, &series);

        assert!(text.contains("No significant anomalies detected"));
        assert!(text.contains("2025-04-28"));
    }

    #[test]
    fn test_report_line_layout() {
        let series = TimeSeries::from_points(vec![
            point(5, vec![0.2, 0.4], SampleOrigin::Fetched),
            point(6, vec![0.2, 0.4], SampleOrigin::Fetched),
        ])
        .unwrap();
        let report = analyze(&series, &AnalyzerParams::default()).unwrap();
        let text = render_report(&report, &series);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(RULE_WIDTH));
        assert_eq!(lines[3], "Mean index: 0.3000");
        assert!(lines[lines.len() - 3].starts_with("  2025-05-28"));
        assert!(lines[lines.len() - 2].starts_with("  2025-06-28"));
        assert!(lines[lines.len() - 1].starts_with("  normal range"));
        assert!(text.ends_with('\n'));
    }
}
