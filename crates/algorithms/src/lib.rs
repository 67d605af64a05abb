//! # Vegwatch Algorithms
//!
//! Vegetation monitoring pipeline for vegwatch.
//!
//! ## Algorithm Categories
//!
//! - **imagery**: RGB vegetation index with a swappable NIR model, two-band NDVI
//! - **timeseries**: monthly reference dates and series assembly from an image source
//! - **health**: baseline statistics, anomaly detection, classification, text report

pub mod health;
pub mod imagery;
pub mod timeseries;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::health::{
        analyze, classify, render_report, AnalyzerParams, AnomalyEvent, HealthAnalyzer,
        HealthReport, HealthStatus, Severity,
    };
    pub use crate::imagery::{
        ndvi, normalized_difference, rgb_vegetation_index, NirModel, VegetationIndex,
        VisibleBandNir,
    };
    pub use crate::timeseries::{
        build_series, build_series_now, reference_dates, FetchPolicy, SeriesConfig, TimePoint,
        TimeSeries,
    };
    pub use vegwatch_core::prelude::*;
}
