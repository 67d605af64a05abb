//! Three-channel RGB pixel grids as returned by an image source

use crate::error::{Error, Result};
use crate::raster::GeoTransform;
use ndarray::{Array3, ArrayView2, Axis};

/// Channel order of a [`PixelGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

/// An RGB image stored as `(rows, cols, 3)` 8-bit samples.
///
/// Construction checks the channel count, so every `PixelGrid` is a
/// well-formed input for the vegetation index calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    data: Array3<u8>,
    transform: GeoTransform,
}

impl PixelGrid {
    /// Wrap an existing `(rows, cols, 3)` array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (rows, cols, channels) = data.dim();
        if channels != 3 {
            return Err(Error::InvalidParameter {
                name: "channels",
                value: channels.to_string(),
                reason: "pixel grids must have exactly 3 (RGB) channels".into(),
            });
        }
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
        Ok(Self {
            data,
            transform: GeoTransform::default(),
        })
    }

    /// Build from interleaved `RGBRGB...` bytes, as produced by image decoders.
    pub fn from_raw(rows: usize, cols: usize, raw: Vec<u8>) -> Result<Self> {
        if raw.len() != rows * cols * 3 {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
        let data = Array3::from_shape_vec((rows, cols, 3), raw)
            .map_err(|e| Error::Other(e.to_string()))?;
        Self::from_array(data)
    }

    /// A grid where every pixel has the same color
    pub fn uniform(rows: usize, cols: usize, rgb: [u8; 3]) -> Result<Self> {
        let data = Array3::from_shape_fn((rows, cols, 3), |(_, _, c)| rgb[c]);
        Self::from_array(data)
    }

    pub fn rows(&self) -> usize {
        self.data.dim().0
    }

    pub fn cols(&self) -> usize {
        self.data.dim().1
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        let (rows, cols, _) = self.data.dim();
        (rows, cols)
    }

    /// View of a single channel
    pub fn channel(&self, channel: Channel) -> ArrayView2<'_, u8> {
        self.data.index_axis(Axis(2), channel as usize)
    }

    /// `[r, g, b]` at (row, col), if inside the grid
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        let r = *self.data.get((row, col, 0))?;
        let g = *self.data.get((row, col, 1))?;
        let b = *self.data.get((row, col, 2))?;
        Some([r, g, b])
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    /// Builder-style variant of [`PixelGrid::set_transform`]
    pub fn with_transform(mut self, transform: GeoTransform) -> Self {
        self.transform = transform;
        self
    }
}
