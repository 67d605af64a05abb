//! Assemble a monthly index series from an image source

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vegwatch_core::raster::{IndexGrid, PixelGrid};
use vegwatch_core::{Coordinate, Error, ImageSource, Result};

use super::dates::reference_dates;
use super::series::{SampleOrigin, TimePoint, TimeSeries};
use crate::imagery::{rgb_vegetation_index, NirModel, VisibleBandNir};
use crate::maybe_rayon::*;

fn default_months() -> usize {
    6
}

fn default_size() -> u32 {
    512
}

/// What to analyze and how to request it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub coordinate: Coordinate,
    /// Number of completed months before today to sample
    #[serde(default = "default_months")]
    pub months: usize,
    /// Requested snapshot edge length in pixels
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub nir: VisibleBandNir,
}

impl SeriesConfig {
    /// Six months of 512 px snapshots around `coordinate`
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            months: default_months(),
            size: default_size(),
            nir: VisibleBandNir::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.coordinate.validate()?;
        if self.months == 0 {
            return Err(Error::InvalidParameter {
                name: "months",
                value: "0".into(),
                reason: "at least one month is required".into(),
            });
        }
        if self.size == 0 {
            return Err(Error::InvalidParameter {
                name: "size",
                value: "0".into(),
                reason: "snapshot size must be positive".into(),
            });
        }
        self.nir.validate()
    }
}

/// What to do when the image source fails for a month.
///
/// A month is never dropped: the series always has one point per
/// reference date or the build fails.
#[derive(Debug, Clone, Default)]
pub enum FetchPolicy {
    /// Abort with [`Error::DataUnavailable`] naming the failed date
    #[default]
    Strict,
    /// Use this grid for any month the source cannot supply
    Fallback(PixelGrid),
}

/// Shared cancellation switch for a running build.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Build the series for the `config.months` months before `today`.
///
/// See [`build_series_with`] for the full contract.
pub fn build_series(
    config: &SeriesConfig,
    today: NaiveDate,
    source: &dyn ImageSource,
    policy: &FetchPolicy,
) -> Result<TimeSeries> {
    build_series_with(config, today, source, policy, &config.nir, &CancelFlag::new())
}

/// [`build_series`] relative to the local calendar date.
pub fn build_series_now(
    config: &SeriesConfig,
    source: &dyn ImageSource,
    policy: &FetchPolicy,
) -> Result<TimeSeries> {
    let today = chrono::Local::now().date_naive();
    build_series(config, today, source, policy)
}

/// Fetch one snapshot per reference date, convert each to an index grid
/// with `model`, and return the points most recent first.
///
/// Fetches are independent and run in parallel with the `parallel`
/// feature. Under [`FetchPolicy::Strict`] the first failure aborts the
/// build. If `cancel` is raised, pending fetches are skipped and the build
/// returns [`Error::Cancelled`]; points computed so far are discarded.
pub fn build_series_with(
    config: &SeriesConfig,
    today: NaiveDate,
    source: &dyn ImageSource,
    policy: &FetchPolicy,
    model: &dyn NirModel,
    cancel: &CancelFlag,
) -> Result<TimeSeries> {
    config.validate()?;
    let dates = reference_dates(today, config.months)?;

    info!(
        "Building {}-month series at {} from {} ({} NIR)",
        config.months,
        config.coordinate,
        source.name(),
        model.name()
    );

    let fallback: Option<IndexGrid> = match policy {
        FetchPolicy::Strict => None,
        FetchPolicy::Fallback(grid) => Some(rgb_vegetation_index(grid, model)),
    };

    let points = dates
        .into_par_iter()
        .map(|date| {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            fetch_point(config, date, source, model, fallback.as_ref())
        })
        .collect::<Result<Vec<TimePoint>>>()?;

    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let series = TimeSeries::from_points(points)?;
    let substituted = series.fallback_count();
    if substituted > 0 {
        warn!("{} of {} months use the fallback grid", substituted, series.len());
    }
    info!("Series assembled: {} points", series.len());
    Ok(series)
}

fn fetch_point(
    config: &SeriesConfig,
    date: NaiveDate,
    source: &dyn ImageSource,
    model: &dyn NirModel,
    fallback: Option<&IndexGrid>,
) -> Result<TimePoint> {
    debug!("Fetching {} for {}", config.coordinate, date);

    match source.fetch(config.coordinate, date, config.size) {
        Ok(grid) => {
            let index = rgb_vegetation_index(&grid, model);
            debug!("{}: {}x{} index grid", date, index.cols(), index.rows());
            Ok(TimePoint::new(date, index, SampleOrigin::Fetched))
        }
        Err(err) => match fallback {
            Some(index) => {
                warn!("{}, using fallback grid", err);
                Ok(TimePoint::new(date, index.clone(), SampleOrigin::Fallback))
            }
            None => Err(Error::DataUnavailable { date, source: err }),
        },
    }
}
