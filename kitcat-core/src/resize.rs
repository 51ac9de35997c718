// ABOUTME: Shrink-only image fitting that preserves aspect ratio
// ABOUTME: Computes a single uniform scale factor so the grid fits the terminal bounds

use crate::decode::PixelGrid;
use crate::error::{KitcatError, Result};
use crate::metrics::Bounds;
use image::imageops::FilterType;
use std::fmt;
use std::str::FromStr;

/// Interpolation used when shrinking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Bilinear,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    pub const NAMES: &'static [&'static str] =
        &["nearest", "bilinear", "catmull-rom", "gaussian", "lanczos3"];

    pub fn name(self) -> &'static str {
        match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Bilinear => "bilinear",
            ResizeFilter::CatmullRom => "catmull-rom",
            ResizeFilter::Gaussian => "gaussian",
            ResizeFilter::Lanczos3 => "lanczos3",
        }
    }

    fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ResizeFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(ResizeFilter::Nearest),
            "bilinear" | "triangle" => Ok(ResizeFilter::Bilinear),
            "catmull-rom" | "catmullrom" => Ok(ResizeFilter::CatmullRom),
            "gaussian" => Ok(ResizeFilter::Gaussian),
            "lanczos3" | "lanczos" => Ok(ResizeFilter::Lanczos3),
            _ => Err(format!(
                "Invalid filter '{}'. Must be one of: {}",
                s,
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub enum ResizeOutcome {
    /// The grid already fit and is handed back untouched
    Unchanged(PixelGrid),
    /// A new, smaller grid replaced the original
    Resized(PixelGrid),
}

impl ResizeOutcome {
    pub fn was_resized(&self) -> bool {
        matches!(self, ResizeOutcome::Resized(_))
    }

    pub fn grid(&self) -> &PixelGrid {
        match self {
            ResizeOutcome::Unchanged(grid) | ResizeOutcome::Resized(grid) => grid,
        }
    }

    pub fn into_grid(self) -> PixelGrid {
        match self {
            ResizeOutcome::Unchanged(grid) | ResizeOutcome::Resized(grid) => grid,
        }
    }
}

/// Target size for a `width`x`height` image inside `bounds`, or `None` when it already fits.
///
/// The limiting axis lands exactly on its bound; the other axis is rounded and clamped
/// to `1..=bound`.
pub fn target_dimensions(width: u32, height: u32, bounds: Bounds) -> Option<(u32, u32)> {
    if bounds.contains(width, height) {
        return None;
    }

    let width_ratio = bounds.max_width as f64 / width as f64;
    let height_ratio = bounds.max_height as f64 / height as f64;

    if width_ratio <= height_ratio {
        let scaled = (height as f64 * width_ratio).round() as u32;
        Some((bounds.max_width, scaled.clamp(1, bounds.max_height)))
    } else {
        let scaled = (width as f64 * height_ratio).round() as u32;
        Some((scaled.clamp(1, bounds.max_width), bounds.max_height))
    }
}

/// Fit the grid into `bounds`, consuming it
pub fn fit(grid: PixelGrid, bounds: Bounds, filter: ResizeFilter) -> Result<ResizeOutcome> {
    if bounds.is_empty() {
        return Err(KitcatError::Resize(format!(
            "bounds {} have zero area",
            bounds
        )));
    }

    match target_dimensions(grid.width(), grid.height(), bounds) {
        None => {
            log::debug!(
                "Image {} fits within {}, resize skipped",
                grid.dimensions_str(),
                bounds
            );
            Ok(ResizeOutcome::Unchanged(grid))
        }
        Some((width, height)) => {
            log::debug!(
                "Scaling image from {} to {}x{} ({} filter)",
                grid.dimensions_str(),
                width,
                height,
                filter
            );
            let resized = grid
                .into_image()
                .resize_exact(width, height, filter.filter_type());
            Ok(ResizeOutcome::Resized(PixelGrid::new(resized)))
        }
    }
}
