//! Crop-and-normalize: the full geometry → sample → mask pass.

use tracing::{debug, instrument};

use super::mask::CircleMask;
use super::plan::plan_crop;
use super::sample::sample;
use super::{CropError, CropRegion, CropShape, NormalizedImage};
use crate::config::NormalizeOptions;
use crate::decode::SourceImage;

/// Normalize a crop with default options.
///
/// See [`normalize_with`].
pub fn normalize(
    source: &SourceImage,
    region: &CropRegion,
    shape: CropShape,
) -> Result<NormalizedImage, CropError> {
    normalize_with(source, region, shape, &NormalizeOptions::default())
}

/// Crop `source` to `region` and normalize it to `shape`.
///
/// # Algorithm
/// 1. Plan: shortest side, output size, centered source rectangle
/// 2. Copy the source rectangle into the output at 1:1 scale; reads outside
///    the source come back transparent
/// 3. For circles, clear everything outside the inscribed circle
///
/// The function is pure: identical inputs always give identical pixels, so
/// re-running it with a different shape on the same original image and
/// region is how a shape change is re-derived.
///
/// # Errors
///
/// See [`plan_crop`]. Sampling never fails.
///
/// # Example
///
/// ```ignore
/// let region = CropRegion::new(10.0, 10.0, 300.0, 200.0);
/// let square = normalize(&source, &region, CropShape::Square)?;
/// assert_eq!((square.width, square.height), (200, 200));
/// ```
#[instrument(skip(source), fields(src_w = source.width, src_h = source.height))]
pub fn normalize_with(
    source: &SourceImage,
    region: &CropRegion,
    shape: CropShape,
    options: &NormalizeOptions,
) -> Result<NormalizedImage, CropError> {
    let plan = plan_crop(region, shape, options)?;

    let (width, height) = (plan.width, plan.height);
    let mut pixels = vec![0u8; width as usize * height as usize * 4];

    for (y, row) in pixels.chunks_exact_mut(width as usize * 4).enumerate() {
        let src_y = plan.source_y + y as f64;
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let src_x = plan.source_x + x as f64;
            px.copy_from_slice(&sample(source, src_x, src_y, options.filter));
        }
    }

    if shape.is_masked() {
        CircleMask::inscribed(width, height).apply(&mut pixels, width, height);
    }

    debug!(width, height, %shape, "Crop normalized");
    Ok(NormalizedImage {
        width,
        height,
        shape,
        pixels,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_support::gradient_source;
    use proptest::prelude::*;

    fn shape_strategy() -> impl Strategy<Value = CropShape> {
        prop_oneof![
            Just(CropShape::Rect),
            Just(CropShape::Square),
            Just(CropShape::Circle)
        ]
    }

    fn region_strategy() -> impl Strategy<Value = CropRegion> {
        (-20.0f64..60.0, -20.0f64..60.0, 1.0f64..64.0, 1.0f64..64.0)
            .prop_map(|(x, y, w, h)| CropRegion::new(x, y, w, h))
    }

    proptest! {
        /// Property: Equal-sided regions give s x s squares and circles.
        #[test]
        fn prop_square_region_square_output(
            s in 1u32..=64,
            shape in prop_oneof![Just(CropShape::Square), Just(CropShape::Circle)],
        ) {
            let src = gradient_source(32, 32);
            let region = CropRegion::new(0.0, 0.0, s as f64, s as f64);
            let out = normalize(&src, &region, shape).unwrap();

            prop_assert_eq!((out.width, out.height), (s, s));
        }

        /// Property: Rectangle output is always 2:1.
        #[test]
        fn prop_rect_two_to_one(region in region_strategy()) {
            let src = gradient_source(48, 48);
            let out = normalize(&src, &region, CropShape::Rect).unwrap();

            prop_assert_eq!(out.width, 2 * out.height);
        }

        /// Property: Pixel buffer length matches dimensions.
        #[test]
        fn prop_pixel_data_matches_dimensions(
            region in region_strategy(),
            shape in shape_strategy(),
        ) {
            let src = gradient_source(48, 48);
            let out = normalize(&src, &region, shape).unwrap();

            prop_assert_eq!(out.pixels.len(), (out.width * out.height * 4) as usize);
        }

        /// Property: Circle pixels outside the inscribed circle are transparent.
        #[test]
        fn prop_circle_outside_transparent(region in region_strategy()) {
            let src = gradient_source(48, 48);
            let out = normalize(&src, &region, CropShape::Circle).unwrap();
            let r = out.width as f64 / 2.0;

            for y in 0..out.height {
                for x in 0..out.width {
                    let dx = x as f64 + 0.5 - r;
                    let dy = y as f64 + 0.5 - r;
                    if (dx * dx + dy * dy).sqrt() > r {
                        prop_assert_eq!(out.pixel(x, y).unwrap()[3], 0);
                    }
                }
            }
        }

        /// Property: Normalization is deterministic.
        #[test]
        fn prop_normalize_is_deterministic(
            region in region_strategy(),
            shape in shape_strategy(),
        ) {
            let src = gradient_source(48, 48);
            let a = normalize(&src, &region, shape).unwrap();
            let b = normalize(&src, &region, shape).unwrap();

            prop_assert_eq!(a, b);
        }

        /// Property: In-bounds output pixels are unmodified source pixels.
        #[test]
        fn prop_inside_pixels_copied(
            x in 0u32..16,
            y in 0u32..16,
            s in 1u32..=16,
        ) {
            let src = gradient_source(32, 32);
            let region = CropRegion::new(x as f64, y as f64, s as f64, s as f64);
            let out = normalize(&src, &region, CropShape::Square).unwrap();

            for oy in 0..s {
                for ox in 0..s {
                    prop_assert_eq!(out.pixel(ox, oy), src.pixel(x + ox, y + oy));
                }
            }
        }

        /// Property: Half-pixel offsets read consecutive source columns,
        /// including across zero.
        #[test]
        fn prop_half_pixel_offset_contiguous(
            offset in -20i64..20,
            s in 1u32..=16,
        ) {
            let src = gradient_source(32, 32);
            let region = CropRegion::new(offset as f64 + 0.5, 0.0, s as f64, s as f64);
            let out = normalize(&src, &region, CropShape::Square).unwrap();

            for ox in 0..s {
                let src_x = offset + ox as i64 + 1;
                let expected = if (0..32).contains(&src_x) {
                    src.pixel(src_x as u32, 0)
                } else {
                    Some([0, 0, 0, 0])
                };
                prop_assert_eq!(out.pixel(ox, 0), expected);
            }
        }
    }
}
