//! Vegetation health analysis
//!
//! - Baseline statistics over the whole series
//! - Month-to-month deltas and anomaly detection
//! - Health classification of the latest month
//! - Text report rendering

mod analyzer;
mod report;

pub use analyzer::{
    analyze, classify, AnalyzerParams, AnomalyEvent, HealthAnalyzer, HealthReport, HealthStatus,
    Severity, Trend,
};
pub use report::render_report;
