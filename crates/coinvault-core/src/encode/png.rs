//! Lossless PNG encoding of normalized crops.
//!
//! Circle crops and crops that ran past the source need an alpha channel;
//! fully opaque rectangles and squares are written as RGB to keep the
//! base64 payload on the coin record smaller.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;
use tracing::{debug, instrument};

use super::EncodedPayload;
use crate::crop::NormalizedImage;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

impl EncodeError {
    /// Stable identifier for this error, used as the JS error name.
    pub fn kind(&self) -> &'static str {
        match self {
            EncodeError::InvalidPixelData { .. } | EncodeError::InvalidDimensions { .. } => {
                "InvalidImage"
            }
            EncodeError::EncodingFailed(_) => "EncodeFailure",
        }
    }
}

/// Encode a normalized crop as PNG.
///
/// # Example
///
/// ```ignore
/// let payload = encode_png(&normalized)?;
/// coin.front_image_base64 = payload.to_base64();
/// ```
#[instrument(skip(image), fields(width = image.width, height = image.height, shape = %image.shape))]
pub fn encode_png(image: &NormalizedImage) -> Result<EncodedPayload, EncodeError> {
    let bytes = if image.has_alpha() {
        encode_png_rgba(&image.pixels, image.width, image.height)?
    } else {
        let rgb: Vec<u8> = image
            .pixels
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();
        encode_png_rgb(&rgb, image.width, image.height)?
    };

    debug!(bytes = bytes.len(), alpha = image.has_alpha(), "Crop encoded");
    Ok(EncodedPayload::png(bytes))
}

/// Encode RGBA pixel data (4 bytes per pixel, row-major) to PNG bytes.
pub fn encode_png_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    write_png(pixels, width, height, ExtendedColorType::Rgba8, 4)
}

/// Encode RGB pixel data (3 bytes per pixel, row-major) to PNG bytes.
pub fn encode_png_rgb(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    write_png(pixels, width, height, ExtendedColorType::Rgb8, 3)
}

fn write_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: ExtendedColorType,
    channels: usize,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * channels;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}
