//! Coinvault Core - crop normalization for coin photos
//!
//! This crate turns an uploaded coin photo plus a user-drawn crop region into
//! a fixed-aspect image (2:1 rectangle, square, or masked circle) encoded as
//! a base64 PNG for storage on a coin record.
//!
//! # Pipeline
//!
//! 1. [`decode`]: JPEG/PNG bytes or a data URL → [`SourceImage`]
//! 2. [`crop`]: source + [`CropRegion`] + [`CropShape`] → [`NormalizedImage`]
//! 3. [`encode`]: normalized image → PNG [`EncodedPayload`]
//!
//! [`session`] keeps the original image and region around so a shape change
//! can be re-derived without asking the user to crop again.

pub mod config;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod error;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{NormalizeOptions, RectOverflow, SampleFilter};
pub use crop::{normalize, normalize_with, CropError, CropRegion, CropShape, NormalizedImage};
pub use decode::{DecodeError, SourceImage};
pub use encode::{EncodeError, EncodedPayload};
pub use error::{Error, Result};
pub use session::{CoinCropSession, CoinImagePayload, CoinSide, CropSession, SessionError};

/// Decode, crop and encode an upload in one call.
///
/// This is the path for a fresh upload where no re-derivation is needed;
/// use a [`CropSession`] when the shape may change afterwards.
pub fn normalize_upload(
    bytes: &[u8],
    region: &CropRegion,
    shape: CropShape,
    options: &NormalizeOptions,
) -> Result<EncodedPayload> {
    let source = decode::decode_image_with_limit(bytes, options.max_source_edge)?;
    let normalized = normalize_with(&source, region, shape, options)?;
    Ok(encode::encode_png(&normalized)?)
}
