mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command, IoArgs};
use rasterfilter::{EdgeParams, Filter, FilterOptions, default_output_path, filter_image, load_gray, save_gray};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut options = FilterOptions::default();

    let (filter, io) = match cli.command {
        Command::Sobel {
            io,
            threshold,
            strength,
            direction,
        } => {
            options.edges = EdgeParams {
                threshold,
                strength_ratio: strength,
                direction,
            };
            (Filter::Sobel, io)
        }
        Command::Gray { io } => (Filter::Grayscale, io),
        Command::Brightness { io, delta } => {
            options.brightness = delta;
            (Filter::Brightness, io)
        }
    };

    let (input, output) = resolve_paths(io, filter)?;

    println!("Filtering {} to {}...", input.display(), output.display());

    let gray = load_gray(&input)?;

    // Only the filter itself is timed, not decode or encode
    let start = Instant::now();
    let result = filter_image(&gray, filter, &options)?;
    let elapsed = start.elapsed();

    save_gray(&result, &output)?;

    println!("{:?} filter took {} milliseconds", filter, elapsed.as_millis());
    println!("Result saved in: {}", output.display());
    Ok(())
}

fn resolve_paths(io: IoArgs, filter: Filter) -> Result<(PathBuf, PathBuf)> {
    if !is_png(&io.input) {
        bail!("Invalid file type {}: only png files are supported", io.input.display());
    }
    if !io.input.exists() {
        bail!("Invalid file path: {} does not exist", io.input.display());
    }

    let output = io
        .output
        .unwrap_or_else(|| default_output_path(&io.input, filter.suffix()));
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            bail!("Invalid result path: {} is not a directory", parent.display());
        }
    }

    Ok((io.input, output))
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}
