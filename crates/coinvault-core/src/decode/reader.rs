//! JPEG/PNG decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;
use tracing::{debug, instrument, warn};

use super::{DecodeError, Orientation, SourceImage};
use crate::config::DEFAULT_MAX_SOURCE_EDGE;

/// Decode an uploaded photo, applying EXIF orientation correction.
///
/// The format is sniffed from the bytes, so both JPEG (phone cameras) and
/// PNG (previously normalized crops) are accepted.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for empty input, `DecodeError::TooLarge` if
/// either edge exceeds [`DEFAULT_MAX_SOURCE_EDGE`], and
/// `DecodeError::DecodeFailure` for anything the decoder rejects.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    decode_image_with_limit(bytes, DEFAULT_MAX_SOURCE_EDGE)
}

/// Same as [`decode_image`] with an explicit maximum edge length.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image_with_limit(bytes: &[u8], max_edge: u32) -> Result<SourceImage, DecodeError> {
    check_dimensions(bytes, max_edge)?;

    let orientation = extract_orientation(bytes);
    let img = open(bytes)?
        .decode()
        .map_err(|e| DecodeError::DecodeFailure(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    let source = SourceImage::from_rgba_image(oriented.into_rgba8());
    debug!(
        width = source.width,
        height = source.height,
        ?orientation,
        "Source image decoded"
    );
    Ok(source)
}

/// Decode an image without applying EXIF orientation.
///
/// Use this when the bytes came from an earlier crop, which never carries
/// EXIF data, or when the caller already rotated the pixels.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    check_dimensions(bytes, DEFAULT_MAX_SOURCE_EDGE)?;
    let img = open(bytes)?
        .decode()
        .map_err(|e| DecodeError::DecodeFailure(e.to_string()))?;
    Ok(SourceImage::from_rgba_image(img.into_rgba8()))
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn open(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::DecodeFailure(e.to_string()))
}

/// Read the header dimensions and reject oversized sources before allocating.
fn check_dimensions(bytes: &[u8], max_edge: u32) -> Result<(), DecodeError> {
    let (width, height) = open(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::DecodeFailure(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(DecodeError::DecodeFailure(format!(
            "image has no pixels ({width}x{height})"
        )));
    }
    if width > max_edge || height > max_edge {
        warn!(width, height, max_edge, "Rejecting oversized source image");
        return Err(DecodeError::TooLarge {
            width,
            height,
            max: max_edge,
        });
    }
    Ok(())
}

/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
