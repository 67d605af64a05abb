//! Two-band spectral indices
//!
//! For imagery that carries a real near-infrared band. The RGB-only
//! pipeline lives in [`super::rgb`] and uses the same stabilised formula.

use ndarray::Zip;
use vegwatch_core::raster::Raster;
use vegwatch_core::{Error, Result};

/// Added to every normalized-difference denominator so that two zero
/// bands yield 0 instead of a division by zero.
pub const INDEX_EPSILON: f64 = 1e-10;

/// `(a - b) / (a + b + ε)` for a single pair of samples.
#[inline]
pub fn normalized_difference_value(a: f64, b: f64) -> f64 {
    (a - b) / (a + b + INDEX_EPSILON)
}

/// Compute the normalized difference between two bands:
///
/// `(band_a - band_b) / (band_a + band_b + ε)`
///
/// For non-negative inputs the result lies in [-1, 1]. `NaN` in either
/// band propagates to the output cell. The output keeps `band_a`'s
/// georeferencing.
pub fn normalized_difference(band_a: &Raster, band_b: &Raster) -> Result<Raster> {
    check_dimensions(band_a, band_b)?;

    let data = Zip::from(band_a.data())
        .and(band_b.data())
        .map_collect(|&a, &b| {
            if a.is_nan() || b.is_nan() {
                f64::NAN
            } else {
                normalized_difference_value(a, b)
            }
        });

    let mut output = Raster::from_array(data);
    output.set_transform(*band_a.transform());
    Ok(output)
}

/// Normalized Difference Vegetation Index
///
/// `NDVI = (NIR - Red) / (NIR + Red + ε)`
///
/// Values range from -1 to 1:
/// - Dense vegetation: 0.6 to 0.9
/// - Sparse vegetation: 0.2 to 0.5
/// - Bare soil: 0.1 to 0.2
/// - Water/clouds: -1.0 to 0.0
pub fn ndvi(nir: &Raster, red: &Raster) -> Result<Raster> {
    normalized_difference(nir, red)
}

fn check_dimensions(a: &Raster, b: &Raster) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::SizeMismatch {
            er: a.rows(),
            ec: a.cols(),
            ar: b.rows(),
            ac: b.cols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vegwatch_core::GeoTransform;

    fn make_band(rows: usize, cols: usize, value: f64) -> Raster {
        let mut r = Raster::filled(rows, cols, value);
        r.set_transform(GeoTransform::new(0.0, rows as f64, 1.0, -1.0));
        r
    }

    #[test]
    fn test_normalized_difference_range() {
        let mut a = Raster::new(10, 10);
        let mut b = Raster::new(10, 10);
        for row in 0..10 {
            for col in 0..10 {
                a.set(row, col, (row * 25) as f64).unwrap();
                b.set(row, col, (col * 25) as f64).unwrap();
            }
        }

        let result = normalized_difference(&a, &b).unwrap();
        for &val in result.data().iter() {
            assert!(
                (-1.0..=1.0).contains(&val),
                "ND out of range: {}",
                val
            );
        }
    }

    #[test]
    fn test_ndvi() {
        let nir = make_band(5, 5, 0.5);
        let red = make_band(5, 5, 0.1);

        let result = ndvi(&nir, &red).unwrap();
        let val = result.get(2, 2).unwrap();

        let expected = (0.5 - 0.1) / (0.5 + 0.1);
        assert!(
            (val - expected).abs() < 1e-8,
            "Expected {}, got {}",
            expected,
            val
        );
        assert_eq!(result.transform(), nir.transform());
    }

    #[test]
    fn test_ndvi_water() {
        // Water: Red > NIR gives a negative index
        let nir = make_band(5, 5, 0.05);
        let red = make_band(5, 5, 0.15);

        let val = ndvi(&nir, &red).unwrap().get(2, 2).unwrap();
        assert!(val < 0.0, "Water should have negative NDVI, got {}", val);
    }

    #[test]
    fn test_zero_bands_are_zero_not_nan() {
        let nir = make_band(3, 3, 0.0);
        let red = make_band(3, 3, 0.0);

        let val = ndvi(&nir, &red).unwrap().get(1, 1).unwrap();
        assert_eq!(val, 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        let mut nir = make_band(5, 5, 0.5);
        nir.set(2, 2, f64::NAN).unwrap();
        let red = make_band(5, 5, 0.1);

        let result = ndvi(&nir, &red).unwrap();
        assert!(result.get(2, 2).unwrap().is_nan());
        assert!(!result.get(0, 0).unwrap().is_nan());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = make_band(5, 5, 1.0);
        let b = make_band(5, 10, 1.0);

        let result = normalized_difference(&a, &b);
        assert!(
            matches!(result, Err(Error::SizeMismatch { .. })),
            "Should fail on dimension mismatch"
        );
    }
}
