// ABOUTME: Core library for showing raster images through the kitty graphics protocol
// ABOUTME: Exposes each pipeline stage plus the composed render entry points

pub mod constants;
pub mod decode;
pub mod emit;
pub mod encode;
pub mod error;
pub mod framer;
pub mod metrics;
pub mod pipeline;
pub mod resize;

pub use decode::{DecodedImage, PixelGrid, SourceFormat};
pub use encode::{EncodedPayload, PayloadOrigin};
pub use error::{KitcatError, Result};
pub use framer::{Chunk, ChunkPosition, ControlOptions, Transmission};
pub use metrics::{
    Bounds, CrosstermMetrics, EnvMetrics, FixedMetrics, TerminalMetrics, WindowMetrics,
};
pub use pipeline::{read_image, render, render_file, RenderOptions, RenderReport};
pub use resize::{ResizeFilter, ResizeOutcome};
