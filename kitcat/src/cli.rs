// ABOUTME: CLI argument definitions for the kitcat image viewer
// ABOUTME: Defines the command-line interface structure using clap derive macros

use crate::config::Config;
use clap::Parser;
use kitcat_core::{RenderOptions, ResizeFilter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kitcat")]
#[command(about = "Show an image inline in a kitty-compatible terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the image file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Maximum image width in pixels (capped at the terminal width)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: Option<u32>,

    /// Maximum image height in pixels (capped at the terminal height)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_height: Option<u32>,

    /// Interpolation used when shrinking: nearest, bilinear, catmull-rom, gaussian, lanczos3
    #[arg(long)]
    pub filter: Option<ResizeFilter>,

    /// Read configuration from this file instead of the default locations
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Combine flags with config values; flags win
    pub fn render_options(&self, config: &Config) -> RenderOptions {
        RenderOptions {
            max_width: self.max_width.or(config.max_width),
            max_height: self.max_height.or(config.max_height),
            filter: self.filter.or(config.filter).unwrap_or_default(),
        }
    }
}
