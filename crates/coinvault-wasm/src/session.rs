//! WASM bindings for the coin crop session.
//!
//! A session holds the original front/back photos and their confirmed
//! regions, so changing the shape dropdown re-derives both crops without
//! asking the user to crop again.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCoinCropSession('rect');
//! session.begin('front', decode_image(frontBytes));
//! session.confirm('front', area.x, area.y, area.width, area.height);
//!
//! shapeSelect.onchange = () => session.set_shape(shapeSelect.value);
//!
//! await api.createCoin({ ...fields, ...session.payloads() });
//! ```

use crate::crop::parse_options;
use crate::error::{serialization_failed, to_js_error};
use crate::types::{shape_or_default, JsNormalizedImage, JsSourceImage};
use coinvault_core::{CoinCropSession, CoinSide, CropRegion, CropShape};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Crop state of one side, as handed to JavaScript.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SideSnapshot {
    side: CoinSide,
    shape: CropShape,
    pending: bool,
    region: Option<CropRegion>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Crop session for both photos of a coin.
#[wasm_bindgen]
pub struct JsCoinCropSession {
    inner: CoinCropSession,
}

#[wasm_bindgen]
impl JsCoinCropSession {
    /// Create an empty session. Unknown or missing shapes fall back to `"rect"`.
    #[wasm_bindgen(constructor)]
    pub fn new(shape: Option<String>, options: JsValue) -> Result<JsCoinCropSession, JsValue> {
        let options = parse_options(options)?;
        Ok(Self {
            inner: CoinCropSession::new(shape_or_default(shape), options),
        })
    }

    /// Start editing a coin from its stored (already cropped) images.
    ///
    /// Both images are borrowed; they stay usable from JavaScript afterwards.
    pub fn from_stored(
        front: &JsSourceImage,
        back: Option<&JsSourceImage>,
        shape: Option<String>,
        options: JsValue,
    ) -> Result<JsCoinCropSession, JsValue> {
        let options = parse_options(options)?;
        CoinCropSession::from_stored(
            front.to_core(),
            back.map(JsSourceImage::to_core),
            shape_or_default(shape),
            options,
        )
        .map(|inner| Self { inner })
        .map_err(to_js_error)
    }

    /// The shared crop shape.
    #[wasm_bindgen(getter)]
    pub fn shape(&self) -> String {
        self.inner.shape().as_str().to_string()
    }

    /// Hold a freshly chosen photo until its crop is confirmed.
    pub fn begin(&mut self, side: &str, image: &JsSourceImage) -> Result<(), JsValue> {
        let side = parse_side(side)?;
        self.inner.begin(side, image.to_core());
        Ok(())
    }

    /// Confirm the pending photo of `side` with the selected region.
    ///
    /// On error the photo stays pending so the cropper can be reopened.
    pub fn confirm(
        &mut self,
        side: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<JsNormalizedImage, JsValue> {
        let side = parse_side(side)?;
        self.inner
            .confirm(side, CropRegion::new(x, y, width, height))
            .map(|out| JsNormalizedImage::from_core(out.clone()))
            .map_err(to_js_error)
    }

    /// Discard pending photos. Returns whether anything was discarded.
    pub fn cancel(&mut self) -> bool {
        self.inner.cancel()
    }

    /// Remove the back photo.
    pub fn remove_back(&mut self) {
        self.inner.remove_back();
    }

    /// Change the shape and re-derive both confirmed crops.
    ///
    /// On error the session keeps its previous shape and crops.
    pub fn set_shape(&mut self, shape: &str) -> Result<(), JsValue> {
        let shape: CropShape = shape.parse().map_err(to_js_error)?;
        self.inner.set_shape(shape).map_err(to_js_error)
    }

    /// Confirmed crop of `side`, or `undefined`.
    pub fn output(&self, side: &str) -> Result<Option<JsNormalizedImage>, JsValue> {
        let side = parse_side(side)?;
        Ok(self
            .inner
            .side(side)
            .output()
            .cloned()
            .map(JsNormalizedImage::from_core))
    }

    /// `{ side, shape, pending, region, width, height }` for `side`.
    pub fn snapshot(&self, side: &str) -> Result<JsValue, JsValue> {
        let snapshot = self.side_snapshot(parse_side(side)?);
        serde_wasm_bindgen::to_value(&snapshot).map_err(serialization_failed)
    }

    /// `{ frontImageBase64, backImageBase64, cropShape }` for the coin record.
    ///
    /// # Errors
    ///
    /// Throws an `Error` named `MissingFront` when no front crop is confirmed.
    pub fn payloads(&self) -> Result<JsValue, JsValue> {
        let payload = self.inner.payloads().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&payload).map_err(serialization_failed)
    }
}

impl JsCoinCropSession {
    fn side_snapshot(&self, side: CoinSide) -> SideSnapshot {
        let session = self.inner.side(side);
        let output = session.output();
        SideSnapshot {
            side,
            shape: session.shape(),
            pending: session.has_pending(),
            region: session.region().copied(),
            width: output.map(|o| o.width),
            height: output.map(|o| o.height),
        }
    }
}

fn parse_side(side: &str) -> Result<CoinSide, JsValue> {
    side.parse().map_err(to_js_error)
}
