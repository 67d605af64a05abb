//! Vegetation index from visible RGB imagery
//!
//! True-color snapshots carry no near-infrared band, so the NIR term of
//! the index is produced by a [`NirModel`]. The default
//! [`VisibleBandNir`] is an empirical linear mix of the visible channels;
//! its coefficients are parameters, not physical constants.

use ndarray::Zip;
use serde::{Deserialize, Serialize};
use vegwatch_core::raster::{Channel, IndexGrid, PixelGrid, Raster};
use vegwatch_core::{Algorithm, Error, Result};

use super::indices::normalized_difference_value;

/// Strategy producing a near-infrared estimate for one pixel.
///
/// The returned value must be non-negative for the index to stay in
/// [-1, 1].
pub trait NirModel: Send + Sync {
    /// Strategy name, for logs and reports
    fn name(&self) -> &'static str;

    /// NIR estimate from 0..=255 red, green and blue samples
    fn nir(&self, red: f64, green: f64, blue: f64) -> f64;
}

/// Linear NIR approximation from the visible bands:
///
/// `NIR = clamp(g·G + r·R + b·B, min, max)`
///
/// Defaults: `g = 2.5`, `r = -1.5`, `b = -0.5`, clamped to [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibleBandNir {
    pub red_weight: f64,
    pub green_weight: f64,
    pub blue_weight: f64,
    /// Lower clamp; keep at or above 0
    pub min: f64,
    pub max: f64,
}

impl Default for VisibleBandNir {
    fn default() -> Self {
        Self {
            red_weight: -1.5,
            green_weight: 2.5,
            blue_weight: -0.5,
            min: 0.0,
            max: 255.0,
        }
    }
}

impl VisibleBandNir {
    /// Check that the clamp range keeps every estimate non-negative
    pub fn validate(&self) -> Result<()> {
        let weights = [self.red_weight, self.green_weight, self.blue_weight];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "nir weights",
                value: format!("{:?}", weights),
                reason: "weights must be finite".into(),
            });
        }
        if !(self.min >= 0.0 && self.max > self.min && self.max.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "nir clamp",
                value: format!("[{}, {}]", self.min, self.max),
                reason: "requires 0 <= min < max".into(),
            });
        }
        Ok(())
    }
}

impl NirModel for VisibleBandNir {
    fn name(&self) -> &'static str {
        "visible-band linear"
    }

    fn nir(&self, red: f64, green: f64, blue: f64) -> f64 {
        let raw = self.green_weight * green + self.red_weight * red + self.blue_weight * blue;
        raw.clamp(self.min, self.max)
    }
}

/// NDVI-like index for every pixel of an RGB grid.
///
/// `index = (NIR - R) / (NIR + R + ε)` with NIR from `model`.
///
/// The output has the grid's (rows, cols) and georeferencing. Total for
/// any `PixelGrid`: samples are non-negative, so with a non-negative NIR
/// estimate every value lies in [-1, 1].
pub fn rgb_vegetation_index(grid: &PixelGrid, model: &dyn NirModel) -> IndexGrid {
    let red = grid.channel(Channel::Red);
    let green = grid.channel(Channel::Green);
    let blue = grid.channel(Channel::Blue);

    let pixel = |&r: &u8, &g: &u8, &b: &u8| {
        let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
        normalized_difference_value(model.nir(r, g, b), r)
    };

    let zip = Zip::from(&red).and(&green).and(&blue);
    #[cfg(feature = "parallel")]
    let data = zip.par_map_collect(pixel);
    #[cfg(not(feature = "parallel"))]
    let data = zip.map_collect(pixel);

    let mut index = Raster::from_array(data);
    index.set_transform(*grid.transform());
    index
}

/// Parameters for [`VegetationIndex`]
#[derive(Debug, Clone, Default)]
pub struct VegetationIndexParams {
    pub nir: VisibleBandNir,
}

/// RGB vegetation index algorithm
#[derive(Debug, Clone, Default)]
pub struct VegetationIndex;

impl Algorithm for VegetationIndex {
    type Input = PixelGrid;
    type Output = IndexGrid;
    type Params = VegetationIndexParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "VegetationIndex"
    }

    fn description(&self) -> &'static str {
        "NDVI-like index from RGB imagery with an approximated near-infrared band"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        params.nir.validate()?;
        Ok(rgb_vegetation_index(&input, &params.nir))
    }
}
