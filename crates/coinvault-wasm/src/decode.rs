//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG/PNG upload (EXIF orientation applied)
//! - [`decode_data_url`] - Decode a stored base64 string or data URL
//! - [`get_orientation`] - Read the EXIF orientation tag (1-8)
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, decode_data_url } from '@coinvault/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const source = decode_image(bytes);
//!
//! // Editing an existing coin
//! const stored = decode_data_url(coin.frontImageBase64);
//! ```

use crate::error::to_js_error;
use crate::types::JsSourceImage;
use coinvault_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded photo from bytes.
///
/// # Errors
///
/// Throws an `Error` named `DecodeFailure` if the bytes are not a readable
/// JPEG or PNG, or `TooLarge` if an edge exceeds the size limit.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_core)
        .map_err(to_js_error)
}

/// Decode a base64 string (as stored on a coin record) or a data URL.
#[wasm_bindgen]
pub fn decode_data_url(input: &str) -> Result<JsSourceImage, JsValue> {
    decode::decode_data_url(input)
        .map(JsSourceImage::from_core)
        .map_err(to_js_error)
}

/// EXIF orientation value (1-8) of the bytes; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}
