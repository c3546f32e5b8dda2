//! Source sampling with transparent out-of-bounds reads.
//!
//! Coordinates are continuous source positions where integer values are
//! pixel centers. Any read outside the source yields [`TRANSPARENT`] rather
//! than an error, since the crop region is never clamped to the source.

use crate::config::SampleFilter;
use crate::decode::SourceImage;

/// Fully transparent black.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Sample `image` at `(x, y)` with the given filter.
#[inline]
pub fn sample(image: &SourceImage, x: f64, y: f64, filter: SampleFilter) -> [u8; 4] {
    match filter {
        SampleFilter::Nearest => sample_nearest(image, x, y),
        SampleFilter::Bilinear => sample_bilinear(image, x, y),
    }
}

#[inline]
fn texel(image: &SourceImage, px: i64, py: i64) -> Option<[u8; 4]> {
    if px < 0 || py < 0 || px > u32::MAX as i64 || py > u32::MAX as i64 {
        return None;
    }
    image.pixel(px as u32, py as u32)
}

/// Take the pixel whose center is closest to `(x, y)`.
///
/// Ties go to the higher index on both sides of zero, so a run of
/// half-pixel positions maps to consecutive columns.
fn sample_nearest(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    let px = (x + 0.5).floor() as i64;
    let py = (y + 0.5).floor() as i64;
    texel(image, px, py).unwrap_or(TRANSPARENT)
}

/// Bilinear interpolation over the 4 surrounding pixels.
///
/// Colors are weighted by alpha so transparent neighbors (including
/// out-of-bounds ones) fade the edge instead of darkening it.
fn sample_bilinear(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut color = [0.0f64; 3];
    let mut alpha = 0.0f64;

    for (px, py, weight) in taps {
        if weight <= 0.0 {
            continue;
        }
        let Some(p) = texel(image, px, py) else {
            continue;
        };
        let a = p[3] as f64 * weight;
        color[0] += p[0] as f64 * a;
        color[1] += p[1] as f64 * a;
        color[2] += p[2] as f64 * a;
        alpha += a;
    }

    if alpha <= 0.0 {
        return TRANSPARENT;
    }

    let channel = |c: f64| (c / alpha).clamp(0.0, 255.0).round() as u8;
    [
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        alpha.clamp(0.0, 255.0).round() as u8,
    ]
}
