//! End-to-end tests: image source -> index grids -> series -> health report.
//!
//! Uses an in-memory image source keyed by date, so no network is involved.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use ndarray::Array3;
use vegwatch_algorithms::health::{analyze, render_report, AnalyzerParams, HealthStatus, Severity, Trend};
use vegwatch_algorithms::timeseries::{
    build_series, reference_dates, FetchPolicy, SampleOrigin, SeriesConfig,
};
use vegwatch_core::{Coordinate, Error, FetchError, ImageSource, PixelGrid};

/// Top half of the grid is `top`, bottom half is `bottom`.
fn split_grid(size: usize, top: [u8; 3], bottom: [u8; 3]) -> PixelGrid {
    let data = Array3::from_shape_fn((size, size, 3), |(row, _, c)| {
        if row < size / 2 {
            top[c]
        } else {
            bottom[c]
        }
    });
    PixelGrid::from_array(data).unwrap()
}

fn sparse() -> PixelGrid {
    split_grid(8, [120, 120, 120], [110, 125, 110])
}

fn lush() -> PixelGrid {
    split_grid(8, [40, 160, 40], [50, 150, 40])
}

struct ScriptedSource {
    grids: HashMap<NaiveDate, PixelGrid>,
}

impl ImageSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch(
        &self,
        _coordinate: Coordinate,
        date: NaiveDate,
        _size: u32,
    ) -> Result<PixelGrid, FetchError> {
        self.grids
            .get(&date)
            .cloned()
            .ok_or(FetchError::NotFound { date })
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

fn config(months: usize) -> SeriesConfig {
    SeriesConfig {
        months,
        size: 8,
        ..SeriesConfig::new(Coordinate::new(20.7151, 86.8659).unwrap())
    }
}

/// Sparse vegetation for every month except the most recent, which greens up.
fn greening_source(months: usize) -> ScriptedSource {
    let dates = reference_dates(today(), months).unwrap();
    let grids = dates
        .iter()
        .enumerate()
        .map(|(i, &d)| (d, if i == 0 { lush() } else { sparse() }))
        .collect();
    ScriptedSource { grids }
}

#[test]
fn greening_in_latest_month_is_flagged() {
    let source = greening_source(4);
    let series = build_series(&config(4), today(), &source, &FetchPolicy::Strict).unwrap();

    assert_eq!(series.len(), 4);
    for point in &series {
        for &v in point.index.data().iter() {
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    let report = analyze(&series, &AnalyzerParams::default()).unwrap();

    assert_eq!(report.deltas.len(), 3);
    assert_eq!(report.anomalies.len(), 1);
    let event = report.anomalies[0];
    assert_eq!((event.older, event.newer), (1, 0));
    assert_eq!(event.trend(), Trend::Increase);
    assert_eq!(event.severity, Severity::High);
    assert_eq!(report.status, HealthStatus::Excellent);

    let text = render_report(&report, &series);
    assert!(text.contains("2024-11-30 to 2024-12-31: Significant increase"));
}

#[test]
fn series_spans_consecutive_months_across_new_year() {
    let source = greening_source(3);
    let series = build_series(&config(3), today(), &source, &FetchPolicy::Strict).unwrap();

    let months: Vec<(i32, u32)> = series
        .chronological()
        .map(|p| (p.date.year(), p.date.month()))
        .collect();
    assert_eq!(months, vec![(2024, 10), (2024, 11), (2024, 12)]);
}

#[test]
fn missing_month_strict_vs_fallback() {
    let mut source = greening_source(4);
    let gap = NaiveDate::from_ymd_opt(2024, 10, 31).unwrap();
    source.grids.remove(&gap);

    let strict = build_series(&config(4), today(), &source, &FetchPolicy::Strict);
    match strict {
        Err(Error::DataUnavailable { date, .. }) => assert_eq!(date, gap),
        other => panic!("expected DataUnavailable, got {:?}", other),
    }

    let series = build_series(
        &config(4),
        today(),
        &source,
        &FetchPolicy::Fallback(sparse()),
    )
    .unwrap();
    assert_eq!(series.len(), 4);
    assert_eq!(series.get(2).unwrap().date, gap);
    assert_eq!(series.get(2).unwrap().origin, SampleOrigin::Fallback);

    // The fallback grid equals the neighbouring months here, so the
    // analysis is unchanged.
    let complete = build_series(
        &config(4),
        today(),
        &greening_source(4),
        &FetchPolicy::Strict,
    )
    .unwrap();
    let params = AnalyzerParams::default();
    assert_eq!(
        analyze(&series, &params).unwrap(),
        analyze(&complete, &params).unwrap()
    );
}

#[test]
fn repeated_analysis_is_identical() {
    let source = greening_source(6);
    let series = build_series(&config(6), today(), &source, &FetchPolicy::Strict).unwrap();
    let params = AnalyzerParams::default();

    let first = analyze(&series, &params).unwrap();
    let second = analyze(&series, &params).unwrap();
    assert_eq!(first, second);
}
