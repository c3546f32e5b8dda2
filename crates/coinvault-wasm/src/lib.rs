//! Coinvault WASM - WebAssembly bindings for coin photo cropping
//!
//! This crate exposes coinvault-core to the web client: decoding uploads,
//! normalizing a crop into a 2:1 rectangle, square or circle, and encoding
//! the result as the base64 PNG stored on a coin record.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Upload and data-URL decoding
//! - `crop` - Crop normalization
//! - `encode` - PNG / base64 / data-URL encoding
//! - `session` - Front/back crop session with shape re-derivation
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, normalize_crop, encode_png_base64 } from '@coinvault/wasm';
//!
//! await init();
//!
//! const source = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const out = normalize_crop(source, area.x, area.y, area.width, area.height, 'square');
//! const frontImageBase64 = encode_png_base64(out);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod encode;
mod error;
mod session;
mod types;

// Re-export public types
pub use crop::{crop_output_size, normalize_crop};
pub use decode::{decode_data_url, decode_image, get_orientation};
pub use encode::{encode_png, encode_png_base64, encode_png_data_url};
pub use session::JsCoinCropSession;
pub use types::{JsNormalizedImage, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "coinvault-wasm {} loaded",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Shape names accepted by `normalize_crop` and the session.
#[wasm_bindgen]
pub fn crop_shapes() -> Vec<String> {
    coinvault_core::CropShape::ALL
        .iter()
        .map(|shape| shape.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_crop_shapes() {
        assert_eq!(crop_shapes(), vec!["rect", "square", "circle"]);
    }
}
