//! Conversion of core errors into JavaScript `Error` objects.
//!
//! The error `name` is the stable kind from [`coinvault_core::Error::kind`],
//! so callers can branch on it:
//!
//! ```typescript
//! try {
//!   normalize_crop(image, x, y, w, h, shape);
//! } catch (e) {
//!   if (e.name === 'InvalidRegion') reopenCropper();
//!   else showUploadError(e.message);
//! }
//! ```

use wasm_bindgen::JsValue;

/// Build a JS `Error` whose `name` is the core error kind.
pub(crate) fn to_js_error(err: impl Into<coinvault_core::Error>) -> JsValue {
    let err = err.into();
    named_error(err.kind(), &err.to_string())
}

/// Build a JS `Error` with the given `name`, for failures that happen in the
/// binding layer itself.
pub(crate) fn named_error(name: &str, message: &str) -> JsValue {
    let js_err = js_sys::Error::new(message);
    js_err.set_name(name);
    js_err.into()
}

/// Options object that could not be read.
pub(crate) fn invalid_options(err: impl std::fmt::Display) -> JsValue {
    named_error("InvalidOptions", &err.to_string())
}

/// Result object that could not be handed to JavaScript.
pub(crate) fn serialization_failed(err: impl std::fmt::Display) -> JsValue {
    named_error("SerializationFailed", &err.to_string())
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use coinvault_core::CropError;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_error_name_is_kind() {
        let value = to_js_error(CropError::InvalidRegion {
            width: 0.0,
            height: 1.0,
        });
        let err: js_sys::Error = value.dyn_into().unwrap();
        assert_eq!(String::from(err.name()), "InvalidRegion");
        assert_eq!(String::from(err.message()), "Invalid crop region: 0x1");
    }

    #[wasm_bindgen_test]
    fn test_named_error() {
        let err: js_sys::Error = invalid_options("missing field").dyn_into().unwrap();
        assert_eq!(String::from(err.name()), "InvalidOptions");
        assert_eq!(String::from(err.message()), "missing field");
    }
}
