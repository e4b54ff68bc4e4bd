use clap::{Args, Parser, Subcommand};
use rasterfilter::Direction;
use rasterfilter::edge_detector::{DEFAULT_STRENGTH_RATIO, DEFAULT_THRESHOLD};
use rasterfilter::brightness::DEFAULT_BRIGHTNESS;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rasterfilter")]
#[command(about = "Sobel edge detection, grayscale and brightness filters for raster images")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Detect edges with the Sobel operator
    Sobel {
        #[command(flatten)]
        io: IoArgs,

        /// Edges stronger than this are amplified, weaker ones suppressed (0-255)
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u8,

        /// Amplification/suppression ratio (0.0-1.0)
        #[arg(short, long, default_value_t = DEFAULT_STRENGTH_RATIO, value_parser = parse_strength)]
        strength: f64,

        /// Which gradient(s) to use
        #[arg(short, long, value_enum, default_value_t = Direction::Both)]
        direction: Direction,
    },

    /// Convert to grayscale
    Gray {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Convert to grayscale and shift brightness
    Brightness {
        #[command(flatten)]
        io: IoArgs,

        /// Brightness offset (-128 to 127)
        #[arg(short = 'b', long, default_value_t = DEFAULT_BRIGHTNESS, allow_negative_numbers = true)]
        delta: i8,
    },
}

#[derive(Args)]
pub struct IoArgs {
    /// Input PNG file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output PNG file (default: <input>_<filter>.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn parse_strength(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err("strength must be between 0 and 1".to_string())
    }
}
