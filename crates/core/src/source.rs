//! The image source boundary
//!
//! Anything that can hand back an RGB snapshot of a location for a date
//! implements [`ImageSource`]. Concrete sources (WMS tiles, local mirrors,
//! caches) live in `vegwatch-cloud`.

use chrono::NaiveDate;

use crate::error::FetchError;
use crate::geo::Coordinate;
use crate::raster::PixelGrid;

/// Supplies one RGB snapshot per (location, date).
///
/// Implementations must be callable repeatedly and from several threads at
/// once; the time-series builder may issue the monthly requests in parallel.
/// Sources are free to retry internally. Callers never do.
pub trait ImageSource: Send + Sync {
    /// Short human-readable name, used in logs
    fn name(&self) -> &str;

    /// Fetch a `size` x `size` snapshot centered on `coordinate` for `date`.
    fn fetch(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
        size: u32,
    ) -> std::result::Result<PixelGrid, FetchError>;
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
        size: u32,
    ) -> std::result::Result<PixelGrid, FetchError> {
        (**self).fetch(coordinate, date, size)
    }
}

impl<S: ImageSource + ?Sized> ImageSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
        size: u32,
    ) -> std::result::Result<PixelGrid, FetchError> {
        (**self).fetch(coordinate, date, size)
    }
}
