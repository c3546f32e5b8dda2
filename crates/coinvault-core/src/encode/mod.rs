//! Image encoding for normalized crops.
//!
//! This module provides functionality for:
//! - Encoding normalized crops to lossless PNG
//! - Wrapping the bytes as base64 / data-URL payloads for coin records
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use coinvault_core::encode::encode_png;
//!
//! let payload = encode_png(&normalized).unwrap();
//! println!("Encoded {} bytes", payload.len());
//! let stored = payload.to_base64();
//! ```

mod payload;
mod png;

pub use payload::{EncodedPayload, PNG_MIME};
pub use png::{encode_png, encode_png_rgb, encode_png_rgba, EncodeError};
