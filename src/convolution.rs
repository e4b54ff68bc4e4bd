//! 3x3 window convolution primitives.
//!
//! Everything here works on fixed-size stack arrays: a [`Window`] sampled
//! from the image around one pixel and a signed [`Kernel`] of weights.
//! The result of every convolution is folded back into a byte with the
//! mirrored [`clip`] rule.

/// Side length of every kernel and window.
pub const KERNEL_SIZE: usize = 3;

/// Distance from the window center to its border, `(KERNEL_SIZE - 1) / 2`.
pub const HALF_EXTENT: usize = (KERNEL_SIZE - 1) / 2;

/// Number of cells in a window or kernel.
pub const WINDOW_LEN: usize = KERNEL_SIZE * KERNEL_SIZE;

/// Row-major 3x3 matrix of signed weights.
pub type Kernel = [i8; WINDOW_LEN];

/// Row-major 3x3 neighborhood of samples, zero where it leaves the image.
pub type Window = [u8; WINDOW_LEN];

/// Sobel kernel responding to intensity changes along x.
pub const HORIZONTAL_GRADIENT: Kernel = [-1, 0, 1, -2, 0, 2, -1, 0, 1];

/// Sobel kernel responding to intensity changes along y.
pub const VERTICAL_GRADIENT: Kernel = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// Map an accumulator into `[0, 255]` by absolute value.
///
/// Anything whose magnitude exceeds 255 saturates to 255; smaller values
/// lose their sign, so `clip(-10) == clip(10) == 10`. This is not a clamp:
/// a negative response is as strong an edge as a positive one.
#[inline]
pub fn clip(value: i64) -> u8 {
    if !(-255..=255).contains(&value) {
        u8::MAX
    } else {
        value.unsigned_abs() as u8
    }
}

/// Sample the 3x3 neighborhood centered on `(row, col)`.
///
/// Cells falling outside the image are zero rather than clamped or
/// reflected, so the window is always fully populated. The row offset is
/// checked against `height` and the column offset against `width`; a
/// non-square kernel would need this pairing re-derived.
pub fn extract_window(image: &[u8], width: usize, height: usize, row: usize, col: usize) -> Window {
    let mut window = [0u8; WINDOW_LEN];

    for kr in 0..KERNEL_SIZE {
        let r = (row + kr).checked_sub(HALF_EXTENT);
        for kc in 0..KERNEL_SIZE {
            let c = (col + kc).checked_sub(HALF_EXTENT);
            if let (Some(r), Some(c)) = (r, c) {
                if r < height && c < width {
                    window[kr * KERNEL_SIZE + kc] = image[r * width + c];
                }
            }
        }
    }

    window
}

/// Dot product of a window and a kernel, clipped to a byte.
///
/// For any `i8` kernel each term is bounded by `255 * 128`, so nine of them
/// fit comfortably in the 64-bit accumulator. With the Sobel kernels the
/// accumulator stays within `±1020`.
#[inline]
pub fn convolve(window: &Window, kernel: &Kernel) -> u8 {
    let acc: i64 = window
        .iter()
        .zip(kernel.iter())
        .map(|(&w, &k)| i64::from(w) * i64::from(k))
        .sum();
    clip(acc)
}
