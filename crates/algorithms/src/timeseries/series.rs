//! Ordered (date, index grid) samples

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vegwatch_core::raster::IndexGrid;
use vegwatch_core::{Error, Result};

/// Where the grid behind a [`TimePoint`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleOrigin {
    /// Returned by the image source for this date
    Fetched,
    /// The caller's fallback grid, substituted after a failed fetch
    Fallback,
}

/// One sample of the series: a reference date and its index grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub index: IndexGrid,
    pub origin: SampleOrigin,
}

impl TimePoint {
    pub fn new(date: NaiveDate, index: IndexGrid, origin: SampleOrigin) -> Self {
        Self { date, index, origin }
    }

    /// Spatial mean of the index grid (`NaN` if no cell is valid)
    pub fn mean(&self) -> f64 {
        self.index.statistics().mean.unwrap_or(f64::NAN)
    }

    /// Spatial population standard deviation of the index grid
    pub fn spread(&self) -> f64 {
        self.index.statistics().std_dev.unwrap_or(f64::NAN)
    }
}

/// Time points ordered most recent first, with unique dates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    points: Vec<TimePoint>,
}

impl TimeSeries {
    /// Order `points` most recent first.
    ///
    /// Fails with [`Error::InvalidParameter`] if two points share a date.
    pub fn from_points(mut points: Vec<TimePoint>) -> Result<Self> {
        points.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(Error::InvalidParameter {
                name: "date",
                value: pair[0].date.to_string(),
                reason: "time series dates must be unique".into(),
            });
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points, most recent first
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn get(&self, position: usize) -> Option<&TimePoint> {
        self.points.get(position)
    }

    /// The most recent point
    pub fn latest(&self) -> Option<&TimePoint> {
        self.points.first()
    }

    /// Iterate most recent first
    pub fn iter(&self) -> std::slice::Iter<'_, TimePoint> {
        self.points.iter()
    }

    /// Iterate oldest first
    pub fn chronological(&self) -> std::iter::Rev<std::slice::Iter<'_, TimePoint>> {
        self.points.iter().rev()
    }

    /// Dates, most recent first
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Number of points that hold the fallback grid
    pub fn fallback_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.origin == SampleOrigin::Fallback)
            .count()
    }

    pub fn into_points(self) -> Vec<TimePoint> {
        self.points
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a TimePoint;
    type IntoIter = std::slice::Iter<'a, TimePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
