//! RGB to single-channel luminance conversion.

use anyhow::{Result, bail};
use rgb::RGB8;

/// Weights applied to the red, green and blue channels.
pub const LUMA_WEIGHTS: (f64, f64, f64) = (0.21, 0.72, 0.07);

/// Convert a single pixel, truncating the weighted sum.
#[inline]
pub fn luminance(p: RGB8) -> u8 {
    let (wr, wg, wb) = LUMA_WEIGHTS;
    (wr * p.r as f64 + wg * p.g as f64 + wb * p.b as f64) as u8
}

/// Convert RGB pixels to a grayscale buffer of the same length.
pub fn to_grayscale(pixels: &[RGB8]) -> Vec<u8> {
    pixels.iter().map(|&p| luminance(p)).collect()
}

/// Convert an interleaved RGB byte buffer to grayscale.
///
/// Only 3-channel input is accepted.
pub fn to_grayscale_interleaved(data: &[u8], width: u32, height: u32, channels: usize) -> Result<Vec<u8>> {
    if channels != 3 {
        bail!("expected a 3-channel RGB image, got {} channels", channels);
    }
    let expected = width as usize * height as usize * channels;
    if data.is_empty() || data.len() != expected {
        bail!(
            "expected {} bytes for a {}x{} RGB image, got {}",
            expected,
            width,
            height,
            data.len()
        );
    }

    Ok(data
        .chunks_exact(3)
        .map(|c| luminance(RGB8::new(c[0], c[1], c[2])))
        .collect())
}
