//! Optional JSON configuration file for `vegwatch analyze`.
//!
//! ```json
//! {
//!   "series": { "coordinate": { "lat": 20.7151, "lon": 86.8659 }, "months": 12 },
//!   "analyzer": { "anomaly_factor": 2.0 },
//!   "wms": { "layer": "s2cloudless-2023" }
//! }
//! ```
//!
//! Every section is optional. Command-line flags override file values.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use vegwatch_algorithms::health::AnalyzerParams;
use vegwatch_algorithms::timeseries::SeriesConfig;
use vegwatch_cloud::WmsOptions;
use vegwatch_core::Coordinate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    pub series: Option<SeriesConfig>,
    pub analyzer: AnalyzerParams,
    pub wms: WmsOptions,
}

/// Series-related flags of `analyze`; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct SeriesOverrides {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub months: Option<usize>,
    pub size: Option<u32>,
}

/// Analyzer flags of `analyze`.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOverrides {
    pub anomaly_factor: Option<f64>,
    pub high_factor: Option<f64>,
}

impl MonitorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Merge flags over the file's series section.
    pub fn series_config(&self, flags: &SeriesOverrides) -> Result<SeriesConfig> {
        let coordinate = match (flags.lat, flags.lon, &self.series) {
            (Some(lat), Some(lon), _) => {
                Coordinate::new(lat, lon).context("Invalid coordinate")?
            }
            (None, None, Some(series)) => series.coordinate,
            (Some(_), None, _) | (None, Some(_), _) => {
                bail!("--lat and --lon must be given together")
            }
            (None, None, None) => {
                bail!("No location: pass --lat and --lon or set series.coordinate in --config")
            }
        };

        let mut config = self
            .series
            .clone()
            .unwrap_or_else(|| SeriesConfig::new(coordinate));
        config.coordinate = coordinate;
        if let Some(months) = flags.months {
            config.months = months;
        }
        if let Some(size) = flags.size {
            config.size = size;
        }
        config.validate().context("Invalid series configuration")?;
        Ok(config)
    }

    /// Merge flags over the file's analyzer section.
    pub fn analyzer_params(&self, flags: &AnalyzerOverrides) -> Result<AnalyzerParams> {
        let mut params = self.analyzer;
        if let Some(f) = flags.anomaly_factor {
            params.anomaly_factor = f;
        }
        if let Some(f) = flags.high_factor {
            params.high_severity_factor = f;
        }
        params.validate().context("Invalid analyzer parameters")?;
        Ok(params)
    }
}
