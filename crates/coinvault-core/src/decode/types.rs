//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a decodable JPEG or PNG.
    #[error("Image could not be decoded: {0}")]
    DecodeFailure(String),

    /// No bytes were provided.
    #[error("No image data provided")]
    Empty,

    /// A base64 or data-URL payload could not be decoded.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// The source exceeds the configured maximum edge.
    #[error("Image is {width}x{height}, larger than the {max}px limit")]
    TooLarge { width: u32, height: u32, max: u32 },
}

impl DecodeError {
    /// Stable identifier for this error, used as the JS error name.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::DecodeFailure(_) | DecodeError::Empty => "DecodeFailure",
            DecodeError::InvalidBase64(_) => "InvalidBase64",
            DecodeError::TooLarge { .. } => "TooLarge",
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded source photo with RGBA pixel data.
///
/// Sources are kept as RGBA so PNG uploads with transparency survive the
/// crop, and so out-of-bounds reads can be represented as transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl SourceImage {
    /// Create a new SourceImage with the given dimensions and RGBA data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a SourceImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// RGBA value at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal);
    }

    #[test]
    fn test_source_image_pixel_out_of_bounds() {
        let img = SourceImage::new(2, 2, vec![0u8; 16]);
        assert!(img.pixel(2, 0).is_none());
        assert!(img.pixel(0, 2).is_none());
    }

    #[test]
    fn test_source_image_from_rgba_image() {
        let rgba = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let img = SourceImage::from_rgba_image(rgba);
        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixel(1, 0), Some([5, 6, 7, 8]));
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::TooLarge {
            width: 9000,
            height: 10,
            max: 8192,
        };
        assert_eq!(err.to_string(), "Image is 9000x10, larger than the 8192px limit");
        assert_eq!(err.kind(), "TooLarge");
        assert_eq!(DecodeError::Empty.kind(), "DecodeFailure");
    }
}
