//! Image decoding for uploaded coin photos.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG uploads into RGBA sources
//! - Correcting EXIF orientation so phone photos are upright before cropping
//! - Decoding base64 / data-URL payloads of previously stored crops
//!
//! All operations are synchronous and single-threaded; the WASM bindings call
//! them directly from the page or a Web Worker.
//!
//! # Examples
//!
//! ```ignore
//! use coinvault_core::decode::decode_image;
//!
//! let bytes = std::fs::read("coin.jpg").unwrap();
//! let source = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} photo", source.width, source.height);
//! ```

mod data_url;
mod reader;
mod types;

pub use data_url::{
    decode_base64_payload, decode_data_url, decode_data_url_with_limit, strip_data_url,
};
pub use reader::{decode_image, decode_image_no_orientation, decode_image_with_limit, get_orientation};
pub use types::{DecodeError, Orientation, SourceImage};
