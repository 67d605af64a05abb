//! Image decoding into [`PixelGrid`]s.

use std::path::Path;

use vegwatch_core::PixelGrid;

use crate::error::Result;

/// Decode an encoded image (JPEG or PNG) into an RGB grid.
///
/// Grayscale and RGBA inputs are converted to RGB8; alpha is dropped.
pub fn decode_rgb(bytes: &[u8]) -> Result<PixelGrid> {
    let img = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = img.dimensions();
    Ok(PixelGrid::from_raw(
        height as usize,
        width as usize,
        img.into_raw(),
    )?)
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> Result<PixelGrid> {
    let bytes = std::fs::read(path)?;
    decode_rgb(&bytes)
}

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}
