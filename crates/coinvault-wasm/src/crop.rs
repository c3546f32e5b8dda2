//! WASM bindings for crop normalization.
//!
//! The cropper UI reports the selected area in source pixels; pass those
//! values straight through.

use crate::error::{invalid_options, to_js_error};
use crate::types::{JsNormalizedImage, JsSourceImage};
use coinvault_core::{normalize_with, CropError, CropRegion, CropShape, NormalizeOptions};
use wasm_bindgen::prelude::*;

/// Crop and normalize an image.
///
/// # Arguments
///
/// * `image` - Source image
/// * `x`, `y` - Top-left of the selected area in source pixels (may be negative)
/// * `width`, `height` - Size of the selected area in source pixels
/// * `shape` - `"rect"` (2:1), `"square"` or `"circle"`
/// * `options` - Optional `{ filter, rectOverflow, maxSourceEdge }`
///
/// # Errors
///
/// Throws an `Error` named `InvalidRegion`, `RegionTooNarrow`,
/// `RegionTooLarge`, `UnknownShape` or `InvalidOptions`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const out = normalize_crop(source, area.x, area.y, area.width, area.height, 'circle');
/// preview.src = out.to_data_url();
/// ```
#[wasm_bindgen]
pub fn normalize_crop(
    image: &JsSourceImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    shape: &str,
    options: JsValue,
) -> Result<JsNormalizedImage, JsValue> {
    let shape: CropShape = shape.parse().map_err(to_js_error)?;
    let options = parse_options(options)?;
    let region = CropRegion::new(x, y, width, height);

    normalize_with(image.as_core(), &region, shape, &options)
        .map(JsNormalizedImage::from_core)
        .map_err(to_js_error)
}

/// Validate a crop selection without producing pixels.
///
/// Returns `[outputWidth, outputHeight]`, useful to show the final size
/// while the user is still dragging.
#[wasm_bindgen]
pub fn crop_output_size(
    width: f64,
    height: f64,
    shape: &str,
    options: JsValue,
) -> Result<Vec<u32>, JsValue> {
    let shape: CropShape = shape.parse().map_err(to_js_error)?;
    let options = parse_options(options)?;
    output_size(width, height, shape, &options)
        .map(|(w, h)| vec![w, h])
        .map_err(to_js_error)
}

fn output_size(
    width: f64,
    height: f64,
    shape: CropShape,
    options: &NormalizeOptions,
) -> Result<(u32, u32), CropError> {
    let region = CropRegion::new(0.0, 0.0, width, height);
    coinvault_core::crop::plan_crop(&region, shape, options).map(|plan| (plan.width, plan.height))
}

/// Read options from a JS object; `undefined` and `null` mean defaults.
pub(crate) fn parse_options(value: JsValue) -> Result<NormalizeOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(NormalizeOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(invalid_options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinvault_core::RectOverflow;

    #[test]
    fn test_output_size_shapes() {
        let opts = NormalizeOptions::default();
        assert_eq!(output_size(300.0, 200.0, CropShape::Square, &opts), Ok((200, 200)));
        assert_eq!(output_size(300.0, 200.0, CropShape::Circle, &opts), Ok((200, 200)));
        assert_eq!(output_size(300.0, 200.0, CropShape::Rect, &opts), Ok((400, 200)));
    }

    #[test]
    fn test_output_size_errors() {
        let opts = NormalizeOptions::default();
        assert!(matches!(
            output_size(0.0, 200.0, CropShape::Square, &opts),
            Err(CropError::InvalidRegion { .. })
        ));

        let reject = NormalizeOptions::default().with_rect_overflow(RectOverflow::Reject);
        assert!(matches!(
            output_size(300.0, 200.0, CropShape::Rect, &reject),
            Err(CropError::RegionTooNarrow { .. })
        ));
    }
}
