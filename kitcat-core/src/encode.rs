// ABOUTME: Chooses the bytes to transmit, reusing the original file when it is safe
// ABOUTME: Serializes the pixel grid to PNG whenever the original cannot be displayed as-is

use crate::decode::{format_size, PixelGrid, SourceFormat};
use crate::error::{KitcatError, Result};
use crate::resize::ResizeOutcome;
use image::{DynamicImage, ImageFormat};
use std::borrow::Cow;
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    /// Input file bytes, passed through verbatim
    Original,
    /// Freshly serialized PNG
    Reencoded,
}

/// The exact bytes handed to the framer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    bytes: Vec<u8>,
    origin: PayloadOrigin,
}

impl EncodedPayload {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn origin(&self) -> PayloadOrigin {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

}

/// Pick the payload: the original bytes only for an unresized PNG, otherwise a new PNG.
pub fn prepare_payload(
    original: Vec<u8>,
    format: SourceFormat,
    outcome: ResizeOutcome,
) -> Result<EncodedPayload> {
    if format.is_displayable() && !outcome.was_resized() {
        log::debug!(
            "{} image needs no conversion, reusing original bytes ({})",
            format,
            format_size(original.len())
        );
        return Ok(EncodedPayload {
            bytes: original,
            origin: PayloadOrigin::Original,
        });
    }

    drop(original);
    let bytes = encode_png(&outcome.into_grid())?;

    log::debug!(
        "Re-encoded {} image as PNG ({})",
        format,
        format_size(bytes.len())
    );

    Ok(EncodedPayload {
        bytes,
        origin: PayloadOrigin::Reencoded,
    })
}

/// Serialize a grid as PNG
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    png_storable(grid.as_image())
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| KitcatError::Encode(format!("failed to encode PNG: {}", e)))?;
    Ok(buffer)
}

/// PNG has no float samples; 32-bit float grids go out as 16-bit
fn png_storable(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageRgb32F(_) => {
            log::debug!("Converting Rgb32F pixels to Rgb16 for PNG");
            Cow::Owned(DynamicImage::ImageRgb16(image.to_rgb16()))
        }
        DynamicImage::ImageRgba32F(_) => {
            log::debug!("Converting Rgba32F pixels to Rgba16 for PNG");
            Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16()))
        }
        _ => Cow::Borrowed(image),
    }
}
