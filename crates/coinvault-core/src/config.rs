//! Caller-supplied options for crop normalization.
//!
//! Options are plain values handed in by the UI layer (deserialized from a
//! JavaScript object in the WASM bindings). Field names use camelCase on the
//! wire to match the frontend, and every field falls back to its default when
//! omitted.

use serde::{Deserialize, Serialize};

/// Largest accepted source edge, in pixels.
///
/// Phone cameras top out around 8000px on the long edge; anything bigger is
/// almost certainly not a coin photo and would allocate hundreds of megabytes.
pub const DEFAULT_MAX_SOURCE_EDGE: u32 = 8192;

/// How source pixels are read into the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFilter {
    /// Take the source pixel under each output pixel center (exact copy).
    #[default]
    Nearest,
    /// Blend the four surrounding source pixels; only differs from
    /// `Nearest` when the crop offset is fractional.
    Bilinear,
}

/// What to do when a 2:1 rectangle is wider than the region it is centered in.
///
/// A region of 300x200 has a shortest side of 200, so the rectangle output is
/// 400x200 and necessarily reads 50px past both sides of the drawn box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RectOverflow {
    /// Center the rectangle on the region and read past its edges.
    #[default]
    Extend,
    /// Fail with `CropError::RegionTooNarrow`.
    Reject,
}

/// Options controlling [`crate::crop::normalize_with`] and decoding limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizeOptions {
    /// Sampling filter.
    pub filter: SampleFilter,
    /// Policy for rectangles wider than the selected region.
    pub rect_overflow: RectOverflow,
    /// Maximum width or height of a decoded source, and of a crop's
    /// shortest side.
    pub max_source_edge: u32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            filter: SampleFilter::default(),
            rect_overflow: RectOverflow::default(),
            max_source_edge: DEFAULT_MAX_SOURCE_EDGE,
        }
    }
}

impl NormalizeOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: SampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_rect_overflow(mut self, rect_overflow: RectOverflow) -> Self {
        self.rect_overflow = rect_overflow;
        self
    }

    /// Set the maximum source edge. Zero is treated as 1.
    pub fn with_max_source_edge(mut self, max_source_edge: u32) -> Self {
        self.max_source_edge = max_source_edge.max(1);
        self
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
