//! Sobel edge detection for single-channel images.
//!
//! Every output pixel is an independent pure function of the source image
//! and the [`EdgeParams`], see [`edge_pixel`]. [`detect_edges`] maps that
//! function over all rows in parallel and returns the finished buffer.

use crate::convolution::{HORIZONTAL_GRADIENT, VERTICAL_GRADIENT, Window, convolve, clip, extract_window};
use crate::error::EdgeError;
use clap::ValueEnum;
use rayon::prelude::*;

/// Threshold used when none is given.
pub const DEFAULT_THRESHOLD: u8 = 100;

/// Strength ratio used when none is given.
pub const DEFAULT_STRENGTH_RATIO: f64 = 0.3;

/// Which gradient kernel(s) drive the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Direction {
    /// Horizontal-gradient kernel only, written without threshold adjustment
    #[value(name = "horizontal")]
    HorizontalOnly,
    /// Vertical-gradient kernel only, written without threshold adjustment
    #[value(name = "vertical")]
    VerticalOnly,
    /// Gradient magnitude of both kernels, then threshold adjustment
    #[default]
    #[value(name = "both")]
    Both,
}

impl Direction {
    /// Numeric selector: 0 horizontal, 1 vertical, anything else both.
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Direction::HorizontalOnly,
            1 => Direction::VerticalOnly,
            _ => Direction::Both,
        }
    }
}

/// Tuning of the edge detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    /// Magnitudes above this are amplified, the rest suppressed (only with `Direction::Both`)
    pub threshold: u8,
    /// Amplification/suppression factor in `[0.0, 1.0]`
    pub strength_ratio: f64,
    pub direction: Direction,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            strength_ratio: DEFAULT_STRENGTH_RATIO,
            direction: Direction::Both,
        }
    }
}

impl EdgeParams {
    /// Check the strength ratio; every threshold byte is valid.
    pub fn validate(&self) -> Result<(), EdgeError> {
        if !(0.0..=1.0).contains(&self.strength_ratio) {
            return Err(EdgeError::InvalidParameter(format!(
                "strength ratio must be between 0 and 1, got {}",
                self.strength_ratio
            )));
        }
        Ok(())
    }
}

/// Euclidean combination of the two clipped partial gradients, floored.
///
/// Both partials have already lost their sign, so the result is never
/// negative but can reach `hypot(255, 255) = 360`.
pub fn gradient_magnitude(window: &Window) -> i64 {
    let gx = convolve(window, &HORIZONTAL_GRADIENT);
    let gy = convolve(window, &VERTICAL_GRADIENT);
    f64::from(gx).hypot(f64::from(gy)) as i64
}

/// Full Sobel response of one window: gradient magnitude, then threshold adjustment.
pub fn sobel(window: &Window, threshold: u8, strength_ratio: f64) -> u8 {
    adjust_strength(gradient_magnitude(window), threshold, strength_ratio)
}

/// Boost a magnitude above `threshold` by `1 + strength_ratio`, otherwise
/// attenuate it by `1 - strength_ratio`.
///
/// The scaled value is truncated toward zero and re-clipped, so strong
/// edges saturate at 255.
pub fn adjust_strength(magnitude: i64, threshold: u8, strength_ratio: f64) -> u8 {
    let factor = if magnitude > i64::from(threshold) {
        1.0 + strength_ratio
    } else {
        1.0 - strength_ratio
    };
    clip((magnitude as f64 * factor) as i64)
}

/// Output value of the pixel at `(row, col)`.
///
/// Pure in all its arguments: safe to evaluate for any set of pixels in any
/// order or on any thread.
pub fn edge_pixel(
    image: &[u8],
    width: usize,
    height: usize,
    row: usize,
    col: usize,
    params: &EdgeParams,
) -> u8 {
    let window = extract_window(image, width, height, row, col);
    match params.direction {
        Direction::HorizontalOnly => convolve(&window, &HORIZONTAL_GRADIENT),
        Direction::VerticalOnly => convolve(&window, &VERTICAL_GRADIENT),
        Direction::Both => sobel(&window, params.threshold, params.strength_ratio),
    }
}

/// Detect edges in a row-major single-channel image.
///
/// Returns a new buffer of `width * height` bytes. Fails fast on an empty
/// or mis-sized image, a strength ratio outside `[0, 1]`, or when the output
/// buffer cannot be allocated; no partial result is ever returned.
///
/// # Example
///
/// ```rust
/// use rasterfilter::edge_detector::{detect_edges, Direction};
///
/// let image = vec![100u8; 25];
/// let edges = detect_edges(&image, 5, 5, 100, 0.3, Direction::Both).unwrap();
/// assert_eq!(edges.len(), 25);
/// assert_eq!(edges[2 * 5 + 2], 0);
/// ```
pub fn detect_edges(
    image: &[u8],
    width: u32,
    height: u32,
    threshold: u8,
    strength_ratio: f64,
    direction: Direction,
) -> Result<Vec<u8>, EdgeError> {
    let params = EdgeParams {
        threshold,
        strength_ratio,
        direction,
    };
    detect_edges_with(image, width, height, &params)
}

/// [`detect_edges`] taking its tuning as an [`EdgeParams`].
pub fn detect_edges_with(
    image: &[u8],
    width: u32,
    height: u32,
    params: &EdgeParams,
) -> Result<Vec<u8>, EdgeError> {
    if image.is_empty() {
        return Err(EdgeError::InvalidInput("image is empty".to_string()));
    }
    if width == 0 || height == 0 {
        return Err(EdgeError::InvalidInput(format!(
            "image dimensions must be non-zero, got {}x{}",
            width, height
        )));
    }
    params.validate()?;

    let w = width as usize;
    let h = height as usize;
    let len = w.checked_mul(h).ok_or(EdgeError::AllocationFailure { bytes: usize::MAX })?;
    if image.len() != len {
        return Err(EdgeError::InvalidInput(format!(
            "expected {} samples for a {}x{} image, got {}",
            len,
            width,
            height,
            image.len()
        )));
    }

    let mut output: Vec<u8> = Vec::new();
    output
        .try_reserve_exact(len)
        .map_err(|_| EdgeError::AllocationFailure { bytes: len })?;
    output.resize(len, 0);

    // Rows are disjoint chunks of the output; each cell is written exactly once
    output
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(row, out_row)| {
            for (col, out) in out_row.iter_mut().enumerate() {
                *out = edge_pixel(image, w, h, row, col, params);
            }
        });

    Ok(output)
}
