// ABOUTME: Image decoding with signature-based format dispatch
// ABOUTME: Turns raw file bytes into an owned pixel grid tagged with its source format

use crate::error::{KitcatError, Result};
use image::{DynamicImage, ImageFormat};
use std::fmt;

/// Raster formats the decoder recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Tiff,
}

impl SourceFormat {
    pub fn name(self) -> &'static str {
        match self {
            SourceFormat::Png => "PNG",
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::Gif => "GIF",
            SourceFormat::WebP => "WebP",
            SourceFormat::Bmp => "BMP",
            SourceFormat::Tiff => "TIFF",
        }
    }

    /// Whether the terminal can display the original bytes without conversion
    pub fn is_displayable(self) -> bool {
        self == SourceFormat::Png
    }

    fn image_format(self) -> ImageFormat {
        match self {
            SourceFormat::Png => ImageFormat::Png,
            SourceFormat::Jpeg => ImageFormat::Jpeg,
            SourceFormat::Gif => ImageFormat::Gif,
            SourceFormat::WebP => ImageFormat::WebP,
            SourceFormat::Bmp => ImageFormat::Bmp,
            SourceFormat::Tiff => ImageFormat::Tiff,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An owned, decoded bitmap
#[derive(Debug, Clone)]
pub struct PixelGrid {
    image: DynamicImage,
}

impl PixelGrid {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    pub fn dimensions_str(&self) -> String {
        format!("{}x{}", self.width(), self.height())
    }
}

#[derive(Debug)]
pub struct DecodedImage {
    pub grid: PixelGrid,
    pub format: SourceFormat,
}

struct Signature {
    format: SourceFormat,
    matches: fn(&[u8]) -> bool,
}

fn is_png(data: &[u8]) -> bool {
    data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
}

fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&[0xFF, 0xD8, 0xFF])
}

fn is_gif(data: &[u8]) -> bool {
    data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a")
}

fn is_webp(data: &[u8]) -> bool {
    data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP"
}

fn is_bmp(data: &[u8]) -> bool {
    data.starts_with(b"BM")
}

fn is_tiff(data: &[u8]) -> bool {
    data.starts_with(b"II*\0") || data.starts_with(b"MM\0*")
}

// Checked in order; the first match wins
const SIGNATURES: &[Signature] = &[
    Signature { format: SourceFormat::Png, matches: is_png },
    Signature { format: SourceFormat::Jpeg, matches: is_jpeg },
    Signature { format: SourceFormat::Gif, matches: is_gif },
    Signature { format: SourceFormat::WebP, matches: is_webp },
    Signature { format: SourceFormat::Bmp, matches: is_bmp },
    Signature { format: SourceFormat::Tiff, matches: is_tiff },
];

/// Identify the format from the leading bytes
pub fn detect_format(data: &[u8]) -> Option<SourceFormat> {
    SIGNATURES
        .iter()
        .find(|signature| (signature.matches)(data))
        .map(|signature| signature.format)
}

/// Decode raw bytes into a pixel grid
pub fn decode(data: &[u8]) -> Result<DecodedImage> {
    let format = detect_format(data)
        .ok_or_else(|| KitcatError::Decode("unsupported image format".to_string()))?;

    let image = image::load_from_memory_with_format(data, format.image_format())
        .map_err(|e| KitcatError::Decode(format!("invalid {} data: {}", format, e)))?;

    log::debug!(
        "Decoded {} image {}x{} ({})",
        format,
        image.width(),
        image.height(),
        format_size(data.len())
    );

    Ok(DecodedImage {
        grid: PixelGrid::new(image),
        format,
    })
}

pub(crate) fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
