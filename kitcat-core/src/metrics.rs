// ABOUTME: Terminal pixel-size query behind a small trait seam
// ABOUTME: Provides crossterm-backed, fixed and environment-override metrics sources

use crate::constants::env;
use crate::error::{KitcatError, Result};
use crossterm::terminal::window_size;
use std::ffi::OsString;
use std::fmt;

/// Size of the controlling terminal, in cells and pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMetrics {
    pub rows: u16,
    pub cols: u16,
    pub width_px: u32,
    pub height_px: u32,
}

/// Drawable area the image must fit into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl Bounds {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    pub fn from_metrics(metrics: &WindowMetrics) -> Self {
        Self::new(metrics.width_px, metrics.height_px)
    }

    /// Tighten these bounds with optional user limits
    pub fn limit(self, max_width: Option<u32>, max_height: Option<u32>) -> Self {
        Self {
            max_width: max_width.map_or(self.max_width, |w| w.min(self.max_width)),
            max_height: max_height.map_or(self.max_height, |h| h.min(self.max_height)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max_width == 0 || self.max_height == 0
    }

    pub fn contains(&self, width: u32, height: u32) -> bool {
        width <= self.max_width && height <= self.max_height
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.max_width, self.max_height)
    }
}

pub trait TerminalMetrics {
    /// Query the current terminal size
    fn window_metrics(&self) -> Result<WindowMetrics>;
}

/// Queries the controlling terminal through crossterm
pub struct CrosstermMetrics;

impl TerminalMetrics for CrosstermMetrics {
    fn window_metrics(&self) -> Result<WindowMetrics> {
        let size = window_size()
            .map_err(|e| KitcatError::Terminal(format!("failed to query window size: {}", e)))?;

        // Some terminals and multiplexers answer the ioctl with zero pixel sizes
        if size.width == 0 || size.height == 0 {
            return Err(KitcatError::Terminal(
                "terminal does not report its size in pixels".to_string(),
            ));
        }

        Ok(WindowMetrics {
            rows: size.rows,
            cols: size.columns,
            width_px: u32::from(size.width),
            height_px: u32::from(size.height),
        })
    }
}

/// Always reports the same size
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics(pub WindowMetrics);

impl FixedMetrics {
    pub fn pixels(width_px: u32, height_px: u32) -> Self {
        Self(WindowMetrics {
            rows: 0,
            cols: 0,
            width_px,
            height_px,
        })
    }
}

impl TerminalMetrics for FixedMetrics {
    fn window_metrics(&self) -> Result<WindowMetrics> {
        Ok(self.0)
    }
}

/// Parse a `<width>x<height>` pixel override
pub fn parse_window_pixels(value: &str) -> Result<FixedMetrics> {
    let invalid = || {
        KitcatError::Terminal(format!(
            "invalid {} value '{}', expected <width>x<height>",
            env::WINDOW_PIXELS, value
        ))
    };

    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;

    Ok(FixedMetrics::pixels(width, height))
}

/// Raw `KITCAT_WINDOW_PIXELS` value, validated only when queried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvMetrics(pub OsString);

impl TerminalMetrics for EnvMetrics {
    fn window_metrics(&self) -> Result<WindowMetrics> {
        let value = self.0.to_str().ok_or_else(|| {
            KitcatError::Terminal(format!(
                "invalid {} value '{}', expected <width>x<height>",
                env::WINDOW_PIXELS,
                self.0.to_string_lossy()
            ))
        })?;
        parse_window_pixels(value)?.window_metrics()
    }
}

/// Select the metrics source, honoring the environment override
pub fn detect() -> Box<dyn TerminalMetrics> {
    match std::env::var_os(env::WINDOW_PIXELS) {
        Some(value) => {
            log::debug!(
                "Using {}={} instead of querying the terminal",
                env::WINDOW_PIXELS,
                value.to_string_lossy()
            );
            Box::new(EnvMetrics(value))
        }
        None => Box::new(CrosstermMetrics),
    }
}
