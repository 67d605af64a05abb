//! # Vegwatch Core
//!
//! Core types and traits for the vegwatch vegetation monitor.
//!
//! This crate provides:
//! - `PixelGrid`: RGB snapshot returned by an image source
//! - `Raster`: georeferenced `f64` grid, used for vegetation index grids
//! - `GeoTransform`, `Coordinate`, `BBox`: georeferencing
//! - `ImageSource`: the boundary to whatever supplies imagery
//! - Algorithm trait for consistent API

pub mod error;
pub mod geo;
pub mod raster;
pub mod source;

pub use error::{Error, FetchError, Result};
pub use geo::{BBox, Coordinate};
pub use raster::{Channel, GeoTransform, IndexGrid, PixelGrid, Raster, RasterStatistics};
pub use source::ImageSource;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, FetchError, Result};
    pub use crate::geo::{BBox, Coordinate};
    pub use crate::raster::{GeoTransform, IndexGrid, PixelGrid, Raster};
    pub use crate::source::ImageSource;
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in vegwatch.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
