//! Encoded image payloads for storage on coin records.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// MIME type of every normalized crop.
pub const PNG_MIME: &str = "image/png";

/// Encoded image bytes with their MIME type.
///
/// Coin records store the bare base64 string ([`to_base64`](Self::to_base64));
/// previews in the frontend use the data URL form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl EncodedPayload {
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: PNG_MIME,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Standard (padded) base64 of the bytes, without a data-URL prefix.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_base64_payload, strip_data_url};

    #[test]
    fn test_base64() {
        let payload = EncodedPayload::png(b"coin".to_vec());
        assert_eq!(payload.to_base64(), "Y29pbg==");
        assert_eq!(payload.len(), 4);
        assert!(!payload.is_empty());
    }

    #[test]
    fn test_data_url() {
        let payload = EncodedPayload::png(b"coin".to_vec());
        assert_eq!(payload.to_data_url(), "data:image/png;base64,Y29pbg==");
        assert_eq!(strip_data_url(&payload.to_data_url()).unwrap(), "Y29pbg==");
    }

    #[test]
    fn test_decodes_back_to_bytes() {
        let payload = EncodedPayload::png(vec![0, 1, 2, 254, 255]);
        assert_eq!(
            decode_base64_payload(&payload.to_data_url()).unwrap(),
            payload.clone().into_bytes()
        );
    }
}
