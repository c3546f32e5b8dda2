//! Crop geometry and output types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while planning or performing a crop.
///
/// All of these are recoverable: the caller re-prompts for a new selection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// Width or height is zero, negative, non-finite, or under one pixel,
    /// or the offset is non-finite.
    #[error("Invalid crop region: {width}x{height}")]
    InvalidRegion { width: f64, height: f64 },

    /// The 2:1 rectangle does not fit inside the selected region.
    #[error("Crop region is {width}px wide but a 2:1 rectangle needs {required}px")]
    RegionTooNarrow { width: f64, required: u32 },

    /// The crop's shortest side exceeds the configured maximum.
    #[error("Crop side of {side}px exceeds the {max}px limit")]
    RegionTooLarge { side: u32, max: u32 },

    /// A shape name that is not one of `rect`, `square` or `circle`.
    #[error("Unknown crop shape: {0}")]
    UnknownShape(String),
}

impl CropError {
    /// Stable identifier for this error, used as the JS error name.
    pub fn kind(&self) -> &'static str {
        match self {
            CropError::InvalidRegion { .. } => "InvalidRegion",
            CropError::RegionTooNarrow { .. } => "RegionTooNarrow",
            CropError::RegionTooLarge { .. } => "RegionTooLarge",
            CropError::UnknownShape(_) => "UnknownShape",
        }
    }
}

/// A user-selected crop rectangle in source-pixel coordinates.
///
/// Values come straight from the interactive cropper and may be fractional.
/// The offset may be negative or lie past the source bounds; nothing here is
/// clamped against the source dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A region covering an entire `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    /// `min(width, height)`, the reference unit for every output dimension.
    #[inline]
    pub fn shortest_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Check that the region describes a usable selection.
    ///
    /// # Errors
    ///
    /// `CropError::InvalidRegion` if any field is non-finite, or if width or
    /// height is not positive.
    pub fn validate(&self) -> Result<(), CropError> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();

        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(CropError::InvalidRegion {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Target shape of a normalized crop.
///
/// Serialized with the same names the coin record's `cropShape` field uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropShape {
    /// 2:1 rectangle (width:height).
    #[default]
    Rect,
    /// 1:1 square.
    Square,
    /// 1:1 square with everything outside the inscribed circle transparent.
    Circle,
}

impl CropShape {
    pub const ALL: [CropShape; 3] = [CropShape::Rect, CropShape::Square, CropShape::Circle];

    pub fn as_str(self) -> &'static str {
        match self {
            CropShape::Rect => "rect",
            CropShape::Square => "square",
            CropShape::Circle => "circle",
        }
    }

    /// Output `(width, height)` for a given shortest side.
    #[inline]
    pub fn output_size(self, side: u32) -> (u32, u32) {
        match self {
            CropShape::Rect => (side.saturating_mul(2), side),
            CropShape::Square | CropShape::Circle => (side, side),
        }
    }

    /// Whether the output carries a circular alpha mask.
    #[inline]
    pub fn is_masked(self) -> bool {
        matches!(self, CropShape::Circle)
    }
}

impl fmt::Display for CropShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropShape {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(CropShape::Rect),
            "square" => Ok(CropShape::Square),
            "circle" | "round" => Ok(CropShape::Circle),
            _ => Err(CropError::UnknownShape(s.to_string())),
        }
    }
}

/// A cropped, shape-normalized raster ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Shape this raster was produced for.
    pub shape: CropShape,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl NormalizedImage {
    /// RGBA value at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// True if every pixel has full alpha.
    pub fn is_opaque(&self) -> bool {
        self.pixels.chunks_exact(4).all(|p| p[3] == 255)
    }

    /// Whether encoding needs an alpha channel.
    ///
    /// Circles always do; rectangles and squares only when part of the crop
    /// fell outside the source.
    pub fn has_alpha(&self) -> bool {
        self.shape.is_masked() || !self.is_opaque()
    }
}
