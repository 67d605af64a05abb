//! Imagery analysis algorithms
//!
//! - RGB vegetation index with a pluggable near-infrared model
//! - Normalized difference / NDVI for imagery with a real NIR band

mod indices;
mod rgb;

pub use indices::{ndvi, normalized_difference, normalized_difference_value, INDEX_EPSILON};
pub use rgb::{
    rgb_vegetation_index, NirModel, VegetationIndex, VegetationIndexParams, VisibleBandNir,
};
