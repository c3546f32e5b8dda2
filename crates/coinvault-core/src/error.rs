//! Crate-level error type.

use thiserror::Error;

use crate::crop::CropError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::session::SessionError;

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl Error {
    /// Stable identifier such as `InvalidRegion` or `DecodeFailure`.
    ///
    /// The WASM layer uses this as the JavaScript error `name`, so the UI can
    /// tell "re-select the region" apart from "pick another file".
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Decode(e) => e.kind(),
            Error::Crop(e) => e.kind(),
            Error::Encode(e) => e.kind(),
            Error::Session(e) => e.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
