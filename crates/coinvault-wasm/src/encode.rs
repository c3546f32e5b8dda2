//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode a normalized crop to PNG bytes
//! - [`encode_png_base64`] - PNG as bare base64, the form stored on coin records
//! - [`encode_png_data_url`] - PNG as a `data:image/png;base64,...` URL for previews
//!
//! # Example
//!
//! ```typescript
//! import { normalize_crop, encode_png_base64, encode_png_data_url } from '@coinvault/wasm';
//!
//! const out = normalize_crop(source, x, y, w, h, 'circle');
//! preview.src = encode_png_data_url(out);
//! form.frontImageBase64 = encode_png_base64(out);
//! ```

use crate::error::to_js_error;
use crate::types::JsNormalizedImage;
use coinvault_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a normalized crop to PNG bytes.
///
/// Circle crops and crops with transparent pixels are written as RGBA,
/// everything else as RGB.
///
/// # Errors
///
/// Throws an `Error` named `EncodeFailure` if the PNG writer fails, or
/// `InvalidImage` if the pixel buffer does not match the dimensions.
#[wasm_bindgen]
pub fn encode_png(image: &JsNormalizedImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.as_core())
        .map(|payload| payload.into_bytes())
        .map_err(to_js_error)
}

/// Encode a normalized crop as base64 PNG (no data-URL prefix).
#[wasm_bindgen]
pub fn encode_png_base64(image: &JsNormalizedImage) -> Result<String, JsValue> {
    encode::encode_png(image.as_core())
        .map(|payload| payload.to_base64())
        .map_err(to_js_error)
}

/// Encode a normalized crop as a PNG data URL.
#[wasm_bindgen]
pub fn encode_png_data_url(image: &JsNormalizedImage) -> Result<String, JsValue> {
    encode::encode_png(image.as_core())
        .map(|payload| payload.to_data_url())
        .map_err(to_js_error)
}
