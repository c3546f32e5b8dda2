//! Shared fixtures for unit tests.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::decode::SourceImage;

/// Opaque source where each pixel encodes its own position.
///
/// R and G carry `x` and `y` (mod 256), B is `x ^ y`.
pub(crate) fn gradient_source(width: u32, height: u32) -> SourceImage {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x % 256) as u8);
            pixels.push((y % 256) as u8);
            pixels.push(((x ^ y) % 256) as u8);
            pixels.push(255);
        }
    }
    SourceImage::new(width, height, pixels)
}

/// PNG bytes for a solid RGBA image.
pub(crate) fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let pixels: Vec<u8> = (0..width * height).flat_map(|_| rgba).collect();
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&pixels, width, height, ExtendedColorType::Rgba8)
        .unwrap();
    out
}
