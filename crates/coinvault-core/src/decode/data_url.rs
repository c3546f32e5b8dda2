//! Decoding of base64 payloads as stored on coin records.
//!
//! Coin records keep images as bare base64 strings, while the frontend moves
//! them around as `data:image/...;base64,` URLs. Both forms are accepted here.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{decode_image_with_limit, DecodeError, SourceImage};
use crate::config::DEFAULT_MAX_SOURCE_EDGE;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Return the base64 body of a data URL, or the input itself if it is not
/// a data URL.
///
/// # Errors
///
/// Returns `DecodeError::InvalidBase64` for a data URL that is not
/// base64-encoded (e.g. `data:text/plain,hello`).
pub fn strip_data_url(input: &str) -> Result<&str, DecodeError> {
    let input = input.trim();
    if !input.starts_with(DATA_URL_PREFIX) {
        return Ok(input);
    }
    input
        .find(BASE64_MARKER)
        .map(|idx| &input[idx + BASE64_MARKER.len()..])
        .ok_or_else(|| DecodeError::InvalidBase64("data URL is not base64-encoded".to_string()))
}

/// Decode a base64 string or data URL into raw bytes.
pub fn decode_base64_payload(input: &str) -> Result<Vec<u8>, DecodeError> {
    let body = strip_data_url(input)?;
    if body.is_empty() {
        return Err(DecodeError::Empty);
    }
    STANDARD
        .decode(body)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

/// Decode a base64 string or data URL into a [`SourceImage`].
pub fn decode_data_url(input: &str) -> Result<SourceImage, DecodeError> {
    decode_data_url_with_limit(input, DEFAULT_MAX_SOURCE_EDGE)
}

/// Same as [`decode_data_url`] with an explicit maximum edge length.
pub fn decode_data_url_with_limit(input: &str, max_edge: u32) -> Result<SourceImage, DecodeError> {
    let bytes = decode_base64_payload(input)?;
    decode_image_with_limit(&bytes, max_edge)
}
