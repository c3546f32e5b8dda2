//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Coinvault
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use crate::error::named_error;
use coinvault_core::{CropShape, NormalizedImage, SourceImage};
use wasm_bindgen::prelude::*;

/// A decoded source photo for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is
/// made to JavaScript memory as a `Uint8Array`. Keep the image in WASM memory
/// for the whole crop session and only extract pixels when needed.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a source image from RGBA pixel data (e.g. `ImageData.data`).
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsSourceImage, JsValue> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(named_error(
                "InvalidImage",
                &format!(
                    "expected {expected} RGBA bytes for a non-empty {width}x{height} image, got {}",
                    pixels.len()
                ),
            ));
        }
        Ok(Self::from_core(SourceImage::new(width, height, pixels)))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSourceImage {
    pub(crate) fn from_core(inner: SourceImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &SourceImage {
        &self.inner
    }

    /// Clone into a core image, for APIs that take ownership.
    pub(crate) fn to_core(&self) -> SourceImage {
        self.inner.clone()
    }
}

/// A normalized crop for JavaScript.
#[wasm_bindgen]
pub struct JsNormalizedImage {
    inner: NormalizedImage,
}

#[wasm_bindgen]
impl JsNormalizedImage {
    /// Get the output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Shape name: `"rect"`, `"square"` or `"circle"`.
    #[wasm_bindgen(getter)]
    pub fn shape(&self) -> String {
        self.inner.shape.as_str().to_string()
    }

    /// Whether the encoded PNG will carry an alpha channel.
    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.inner.has_alpha()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy), suitable for
    /// `new ImageData(new Uint8ClampedArray(pixels), width, height)`.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, JsValue> {
        crate::encode::encode_png(self)
    }

    /// Encode as bare base64 PNG, the form stored on coin records.
    pub fn to_base64(&self) -> Result<String, JsValue> {
        crate::encode::encode_png_base64(self)
    }

    /// Encode as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> Result<String, JsValue> {
        crate::encode::encode_png_data_url(self)
    }
}

impl JsNormalizedImage {
    pub(crate) fn from_core(inner: NormalizedImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &NormalizedImage {
        &self.inner
    }
}

/// Parse a shape name; unknown names fall back to the record default (rect).
pub(crate) fn shape_or_default(value: Option<String>) -> CropShape {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}
