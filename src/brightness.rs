//! Additive brightness adjustment for grayscale buffers.

/// Offset applied when none is given.
pub const DEFAULT_BRIGHTNESS: i8 = 20;

/// Add `delta` to every sample, saturating at 0 and 255.
pub fn change_brightness(gray: &[u8], delta: i8) -> Vec<u8> {
    gray.iter().map(|&v| v.saturating_add_signed(delta)).collect()
}
