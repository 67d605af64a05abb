//! Vegetation health classification and month-to-month anomaly detection
//!
//! The series baseline is the mean of the per-grid spatial means (μ) and
//! the mean of the per-grid spatial standard deviations (σ). A change
//! between consecutive months is anomalous when it exceeds
//! `anomaly_factor · σ`, and high severity beyond `high_severity_factor · σ`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use vegwatch_core::{Algorithm, Error, Result};

use crate::timeseries::{TimePoint, TimeSeries};

/// Thresholds for anomaly detection, in multiples of the mean spatial spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    /// |delta| above `anomaly_factor · σ` is an anomaly (default 1.5)
    pub anomaly_factor: f64,
    /// |delta| above `high_severity_factor · σ` is high severity (default 2.0)
    pub high_severity_factor: f64,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            anomaly_factor: 1.5,
            high_severity_factor: 2.0,
        }
    }
}

impl AnalyzerParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.anomaly_factor.is_finite() && self.anomaly_factor > 0.0) {
            return Err(Error::InvalidParameter {
                name: "anomaly_factor",
                value: self.anomaly_factor.to_string(),
                reason: "must be a positive number".into(),
            });
        }
        if !(self.high_severity_factor.is_finite()
            && self.high_severity_factor >= self.anomaly_factor)
        {
            return Err(Error::InvalidParameter {
                name: "high_severity_factor",
                value: self.high_severity_factor.to_string(),
                reason: format!("must be finite and >= anomaly_factor ({})", self.anomaly_factor),
            });
        }
        Ok(())
    }
}

/// Qualitative health of the most recent month relative to the series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Fair => "Fair",
            HealthStatus::Poor => "Poor",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Medium => f.write_str("Medium"),
            Severity::High => f.write_str("High"),
        }
    }
}

/// Direction of an anomalous change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increase,
    Decrease,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increase => f.write_str("increase"),
            Trend::Decrease => f.write_str("decrease"),
        }
    }
}

/// A significant change between two adjacent months.
///
/// `older` and `newer` are positions in the analyzed [`TimeSeries`]
/// (most recent first), so `newer + 1 == older`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEvent {
    pub older: usize,
    pub newer: usize,
    /// `mean(newer) - mean(older)`
    pub delta: f64,
    pub severity: Severity,
}

impl AnomalyEvent {
    pub fn trend(&self) -> Trend {
        if self.delta > 0.0 {
            Trend::Increase
        } else {
            Trend::Decrease
        }
    }

    /// `(older date, newer date)` looked up in the series the event came from
    pub fn period(&self, series: &TimeSeries) -> Option<(NaiveDate, NaiveDate)> {
        let older = series.get(self.older)?;
        let newer = series.get(self.newer)?;
        Some((older.date, newer.date))
    }
}

/// Result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// μ: mean over points of each grid's spatial mean
    pub mean_index: f64,
    /// σ: mean over points of each grid's spatial standard deviation
    pub mean_spread: f64,
    /// Spatial mean of the most recent point
    pub latest_index: f64,
    pub status: HealthStatus,
    /// Month-to-month changes, oldest interval first
    pub deltas: Vec<f64>,
    /// Anomalous intervals, oldest first
    pub anomalies: Vec<AnomalyEvent>,
}

/// Classify `latest` against the series baseline. First match wins:
///
/// | condition      | status    |
/// |----------------|-----------|
/// | latest > μ + σ | Excellent |
/// | latest > μ     | Good      |
/// | latest > μ − σ | Fair      |
/// | otherwise      | Poor      |
pub fn classify(latest: f64, mean: f64, spread: f64) -> HealthStatus {
    if latest > mean + spread {
        HealthStatus::Excellent
    } else if latest > mean {
        HealthStatus::Good
    } else if latest > mean - spread {
        HealthStatus::Fair
    } else {
        HealthStatus::Poor
    }
}

/// Analyze a most-recent-first series.
///
/// Fails with [`Error::InsufficientData`] on an empty series. A single
/// point yields a classification with empty delta and anomaly lists.
pub fn analyze(series: &TimeSeries, params: &AnalyzerParams) -> Result<HealthReport> {
    if series.is_empty() {
        return Err(Error::InsufficientData);
    }
    params.validate()?;

    let n = series.len();
    let means: Vec<f64> = series.iter().map(TimePoint::mean).collect();
    let spreads: Vec<f64> = series.iter().map(TimePoint::spread).collect();

    let mean_index = means.iter().sum::<f64>() / n as f64;
    let mean_spread = spreads.iter().sum::<f64>() / n as f64;

    let threshold = params.anomaly_factor * mean_spread;
    let high = params.high_severity_factor * mean_spread;

    // Walk intervals oldest to newest; position n-1 is the oldest point.
    let mut deltas = Vec::with_capacity(n - 1);
    let mut anomalies = Vec::new();
    for older in (1..n).rev() {
        let newer = older - 1;
        let delta = means[newer] - means[older];
        deltas.push(delta);

        if delta.abs() > threshold {
            let severity = if delta.abs() > high {
                Severity::High
            } else {
                Severity::Medium
            };
            anomalies.push(AnomalyEvent {
                older,
                newer,
                delta,
                severity,
            });
        }
    }

    let latest_index = means[0];
    let status = classify(latest_index, mean_index, mean_spread);

    info!(
        "Health {}: latest {:.4}, mean {:.4}, spread {:.4}, {} anomalies",
        status,
        latest_index,
        mean_index,
        mean_spread,
        anomalies.len()
    );

    Ok(HealthReport {
        mean_index,
        mean_spread,
        latest_index,
        status,
        deltas,
        anomalies,
    })
}

/// Health analysis algorithm
#[derive(Debug, Clone, Default)]
pub struct HealthAnalyzer;

impl Algorithm for HealthAnalyzer {
    type Input = TimeSeries;
    type Output = HealthReport;
    type Params = AnalyzerParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "HealthAnalyzer"
    }

    fn description(&self) -> &'static str {
        "Classify vegetation health and detect month-to-month index anomalies"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        analyze(&input, &params)
    }
}
