pub use anyhow::Result;
use anyhow::{Context, bail};
use log::debug;
use rgb::RGB8;

use crate::grayscale::to_grayscale;

/// Single-channel image, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            bail!(
                "expected {} samples for a {}x{} image, got {}",
                expected,
                width,
                height,
                data.len()
            );
        }
        Ok(Self { width, height, data })
    }

    /// Same dimensions, new samples.
    pub fn with_data(&self, data: Vec<u8>) -> Result<Self> {
        Self::new(self.width, self.height, data)
    }
}

/// Decode an image file into RGB pixels, dropping any alpha channel.
pub fn load_rgb(path: &std::path::Path) -> Result<(u32, u32, Vec<RGB8>)> {
    let img = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let rgb = img.to_rgb8();

    let pixels: Vec<RGB8> = rgb.pixels().map(|p| RGB8::new(p[0], p[1], p[2])).collect();
    debug!("decoded {} ({}x{})", path.display(), rgb.width(), rgb.height());

    Ok((rgb.width(), rgb.height(), pixels))
}

/// Decode an image file and convert it to grayscale.
pub fn load_gray(path: &std::path::Path) -> Result<GrayImage> {
    let (width, height, pixels) = load_rgb(path)?;
    GrayImage::new(width, height, to_grayscale(&pixels))
}

/// Encode a grayscale image; the format follows the file extension.
pub fn save_gray(gray: &GrayImage, path: &std::path::Path) -> Result<()> {
    let buffer: image::GrayImage = image::ImageBuffer::from_raw(gray.width, gray.height, gray.data.clone())
        .context("grayscale buffer does not match its dimensions")?;
    buffer
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!("encoded {} ({}x{})", path.display(), gray.width, gray.height);
    Ok(())
}
