//! Raster data structures

mod geotransform;
mod grid;
mod pixel;

pub use geotransform::GeoTransform;
pub use grid::{Raster, RasterStatistics};
pub use pixel::{Channel, PixelGrid};

/// A per-pixel vegetation index grid, values in [-1, 1]
pub type IndexGrid = Raster;
