//! rasterfilter - local spatial filters for single-channel raster images
//!
//! The heart of the crate is a Sobel edge detector: a 3x3 zero-padded
//! window convolved with the horizontal and vertical gradient kernels,
//! combined into a gradient magnitude and rescaled against a threshold.
//! Grayscale conversion and brightness adjustment are provided alongside
//! so that a color file on disk can be turned into an edge map.
//!
//! ## Features
//!
//! - **Mirrored clipping** of convolution responses (sign is discarded)
//! - **Directional modes**: horizontal, vertical, or combined gradients
//! - **Adaptive contrast**: edges above the threshold are boosted, the rest attenuated
//! - **Data-parallel** evaluation of every output pixel with rayon
//!
//! ## Example
//!
//! ```rust,no_run
//! use rasterfilter::{apply_filter, Filter, FilterOptions};
//! use std::path::Path;
//!
//! let mut options = FilterOptions::default();
//! options.edges.threshold = 80;
//!
//! apply_filter(Path::new("input.png"), Path::new("input_sobel.png"), Filter::Sobel, &options)
//!     .expect("Filtering failed");
//! ```

pub mod brightness;
pub mod convolution;
pub mod edge_detector;
pub mod error;
pub mod grayscale;
pub mod image_processor;

pub use brightness::{DEFAULT_BRIGHTNESS, change_brightness};
pub use convolution::{HORIZONTAL_GRADIENT, Kernel, VERTICAL_GRADIENT, Window, clip, convolve, extract_window};
pub use edge_detector::{Direction, EdgeParams, detect_edges, detect_edges_with, edge_pixel};
pub use error::EdgeError;
pub use grayscale::to_grayscale;
pub use image_processor::{GrayImage, load_gray, save_gray};
pub use anyhow::Result;

use log::{debug, info};
use std::path::{Path, PathBuf};

/// Which filter to run on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Grayscale then Sobel edge detection
    Sobel,
    /// Grayscale conversion only
    Grayscale,
    /// Grayscale then brightness offset
    Brightness,
}

impl Filter {
    /// Suffix appended to the input file stem when no output path is given.
    pub fn suffix(self) -> &'static str {
        match self {
            Filter::Sobel => "sobel",
            Filter::Grayscale => "gray",
            Filter::Brightness => "bright",
        }
    }
}

/// Options for running a filter over an image file
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Edge detector tuning (default: threshold 100, strength 0.3, both directions)
    pub edges: EdgeParams,
    /// Brightness offset in [-128, 127] (default: 20)
    pub brightness: i8,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            edges: EdgeParams::default(),
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

/// `<dir>/<stem>_<suffix>.png` next to `input`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_{}.png", stem, suffix))
}

/// Run `filter` over an in-memory grayscale image.
pub fn filter_image(image: &GrayImage, filter: Filter, options: &FilterOptions) -> Result<GrayImage> {
    let data = match filter {
        Filter::Sobel => detect_edges_with(&image.data, image.width, image.height, &options.edges)?,
        Filter::Grayscale => image.data.clone(),
        Filter::Brightness => change_brightness(&image.data, options.brightness),
    };
    image.with_data(data)
}

/// Load `input_path`, convert it to grayscale, apply `filter` and save the
/// result to `output_path`.
///
/// # Example
///
/// ```rust,no_run
/// use rasterfilter::{apply_filter, Filter, FilterOptions};
/// use std::path::Path;
///
/// apply_filter(Path::new("photo.png"), Path::new("photo_gray.png"), Filter::Grayscale, &FilterOptions::default())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn apply_filter(
    input_path: &Path,
    output_path: &Path,
    filter: Filter,
    options: &FilterOptions,
) -> Result<()> {
    let gray = load_gray(input_path)?;
    debug!("applying {:?} with {:?}", filter, options);

    let result = filter_image(&gray, filter, options)?;
    save_gray(&result, output_path)?;

    info!(
        "{:?}: {} -> {} ({}x{})",
        filter,
        input_path.display(),
        output_path.display(),
        result.width,
        result.height
    );
    Ok(())
}
