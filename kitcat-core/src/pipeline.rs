// ABOUTME: End-to-end decode, fit, encode and transmit pipeline for one image
// ABOUTME: Runs each stage in order and stops at the first failure

use crate::decode::{self, SourceFormat};
use crate::emit::Emitter;
use crate::encode::{self, PayloadOrigin};
use crate::error::{KitcatError, Result};
use crate::framer::Transmission;
use crate::metrics::{Bounds, TerminalMetrics};
use crate::resize::{self, ResizeFilter};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// User adjustments applied on top of the terminal size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub filter: ResizeFilter,
}

/// What a run did, for logging and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub format: SourceFormat,
    pub original_size: (u32, u32),
    pub final_size: (u32, u32),
    pub bounds: Bounds,
    pub resized: bool,
    pub origin: PayloadOrigin,
    pub payload_bytes: usize,
    pub chunk_count: usize,
}

impl fmt::Display for RenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} -> {}x{} within {}, {} payload of {} bytes in {} chunk(s)",
            self.format,
            self.original_size.0,
            self.original_size.1,
            self.final_size.0,
            self.final_size.1,
            self.bounds,
            match self.origin {
                PayloadOrigin::Original => "original",
                PayloadOrigin::Reencoded => "re-encoded",
            },
            self.payload_bytes,
            self.chunk_count
        )
    }
}

/// Read the image file into memory
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| KitcatError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Display `bytes` on the terminal described by `metrics`, writing escapes to `sink`
pub fn render<W: Write>(
    bytes: Vec<u8>,
    metrics: &dyn TerminalMetrics,
    options: &RenderOptions,
    sink: W,
) -> Result<RenderReport> {
    let decoded = decode::decode(&bytes)?;
    let format = decoded.format;
    let original_size = decoded.grid.dimensions();

    let window = metrics.window_metrics()?;
    let bounds = Bounds::from_metrics(&window).limit(options.max_width, options.max_height);
    log::debug!(
        "Terminal is {}x{} cells, {}x{} px; fitting into {}",
        window.cols,
        window.rows,
        window.width_px,
        window.height_px,
        bounds
    );

    let outcome = resize::fit(decoded.grid, bounds, options.filter)?;
    let resized = outcome.was_resized();
    let final_size = outcome.grid().dimensions();

    let payload = encode::prepare_payload(bytes, format, outcome)?;
    let transmission = Transmission::new(&payload);
    let chunks = transmission.chunks();

    Emitter::new(sink).emit(&chunks)?;

    let report = RenderReport {
        format,
        original_size,
        final_size,
        bounds,
        resized,
        origin: payload.origin(),
        payload_bytes: payload.len(),
        chunk_count: chunks.len(),
    };
    log::debug!("{}", report);
    Ok(report)
}

/// Read `path` and render it
pub fn render_file<P: AsRef<Path>, W: Write>(
    path: P,
    metrics: &dyn TerminalMetrics,
    options: &RenderOptions,
    sink: W,
) -> Result<RenderReport> {
    let bytes = read_image(path)?;
    render(bytes, metrics, options, sink)
}
