//! Editing sessions for coin photo crops.
//!
//! A session is a value owned by the UI layer. It keeps the original
//! (uncropped) image and the confirmed crop region in original-image
//! coordinates, so changing the shape later re-derives the output from the
//! original instead of re-cropping an already cropped image, and without
//! asking the user to select the region again.
//!
//! # Lifecycle
//!
//! ```text
//! begin(image) ──▶ pending ──confirm(region)──▶ confirmed ──set_shape──▶ confirmed
//!                     │                                    ▲
//!                     └──cancel()── (previous crop kept) ──┘
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::NormalizeOptions;
use crate::crop::{normalize_with, CropError, CropRegion, CropShape, NormalizedImage};
use crate::decode::SourceImage;
use crate::encode::{encode_png, EncodeError};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `confirm` was called without an image waiting for a crop.
    #[error("No image is waiting for a crop")]
    NothingPending,

    /// The coin has no confirmed front image.
    #[error("A front image is required")]
    MissingFront,

    /// A side name other than `front` or `back`.
    #[error("Unknown coin side: {0}")]
    UnknownSide(String),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl SessionError {
    /// Stable identifier for this error, used as the JS error name.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::NothingPending => "NothingPending",
            SessionError::MissingFront => "MissingFront",
            SessionError::UnknownSide(_) => "UnknownSide",
            SessionError::Crop(e) => e.kind(),
            SessionError::Encode(e) => e.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ConfirmedCrop {
    original: SourceImage,
    region: CropRegion,
    output: NormalizedImage,
}

/// Crop state for a single photo.
#[derive(Debug, Clone, Default)]
pub struct CropSession {
    pending: Option<SourceImage>,
    confirmed: Option<ConfirmedCrop>,
    shape: CropShape,
}

impl CropSession {
    pub fn new(shape: CropShape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    /// Start a session from an image that was already cropped and stored.
    ///
    /// The recorded region covers the whole stored image, so a later shape
    /// change re-derives from it.
    pub fn from_stored(
        image: SourceImage,
        shape: CropShape,
        options: &NormalizeOptions,
    ) -> Result<Self, SessionError> {
        let region = CropRegion::full(image.width, image.height);
        let output = normalize_with(&image, &region, shape, options)?;
        Ok(Self {
            pending: None,
            confirmed: Some(ConfirmedCrop {
                original: image,
                region,
                output,
            }),
            shape,
        })
    }

    /// Hold `image` until the user confirms a crop region.
    ///
    /// Replaces any image already pending; a confirmed crop is untouched.
    pub fn begin(&mut self, image: SourceImage) {
        debug!(width = image.width, height = image.height, "Crop pending");
        self.pending = Some(image);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Crop the pending image and make it the confirmed crop.
    ///
    /// On error the pending image is kept so the caller can re-prompt for a
    /// different region.
    pub fn confirm(
        &mut self,
        region: CropRegion,
        shape: CropShape,
        options: &NormalizeOptions,
    ) -> Result<&NormalizedImage, SessionError> {
        let Some(original) = self.pending.take() else {
            return Err(SessionError::NothingPending);
        };

        let output = match normalize_with(&original, &region, shape, options) {
            Ok(output) => output,
            Err(err) => {
                self.pending = Some(original);
                return Err(err.into());
            }
        };

        self.shape = shape;
        let confirmed = self.confirmed.insert(ConfirmedCrop {
            original,
            region,
            output,
        });
        Ok(&confirmed.output)
    }

    /// Abandon the pending image, if any. Returns whether one was discarded.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Change the shape and re-derive the confirmed output, if there is one.
    ///
    /// On error nothing changes, including the shape.
    pub fn set_shape(
        &mut self,
        shape: CropShape,
        options: &NormalizeOptions,
    ) -> Result<Option<&NormalizedImage>, SessionError> {
        let output = self.rederive(shape, options)?;
        self.install(shape, output);
        Ok(self.output())
    }

    /// Drop everything: pending image, confirmed crop and original.
    pub fn clear(&mut self) {
        self.pending = None;
        self.confirmed = None;
    }

    fn rederive(
        &self,
        shape: CropShape,
        options: &NormalizeOptions,
    ) -> Result<Option<NormalizedImage>, CropError> {
        self.confirmed
            .as_ref()
            .map(|c| normalize_with(&c.original, &c.region, shape, options))
            .transpose()
    }

    fn install(&mut self, shape: CropShape, output: Option<NormalizedImage>) {
        if let (Some(confirmed), Some(output)) = (self.confirmed.as_mut(), output) {
            debug!(from = %self.shape, to = %shape, "Crop re-derived");
            confirmed.output = output;
        }
        self.shape = shape;
    }

    pub fn shape(&self) -> CropShape {
        self.shape
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed.is_some()
    }

    /// Confirmed region in original-image coordinates.
    pub fn region(&self) -> Option<&CropRegion> {
        self.confirmed.as_ref().map(|c| &c.region)
    }

    /// The uncropped image the confirmed region refers to.
    pub fn original(&self) -> Option<&SourceImage> {
        self.confirmed.as_ref().map(|c| &c.original)
    }

    pub fn output(&self) -> Option<&NormalizedImage> {
        self.confirmed.as_ref().map(|c| &c.output)
    }
}

/// Which photo of a coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Front,
    Back,
}

impl CoinSide {
    pub fn as_str(self) -> &'static str {
        match self {
            CoinSide::Front => "front",
            CoinSide::Back => "back",
        }
    }
}

impl FromStr for CoinSide {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" | "obverse" => Ok(CoinSide::Front),
            "back" | "reverse" => Ok(CoinSide::Back),
            _ => Err(SessionError::UnknownSide(s.to_string())),
        }
    }
}

/// Image fields of a coin record, ready to send with an upload or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinImagePayload {
    pub front_image_base64: String,
    pub back_image_base64: Option<String>,
    pub crop_shape: CropShape,
}

/// Crop state for both photos of a coin.
///
/// A coin record has a single `cropShape`, so both sides always share one
/// shape and a shape change re-derives both.
#[derive(Debug, Clone, Default)]
pub struct CoinCropSession {
    shape: CropShape,
    options: NormalizeOptions,
    front: CropSession,
    back: CropSession,
}

impl CoinCropSession {
    pub fn new(shape: CropShape, options: NormalizeOptions) -> Self {
        Self {
            shape,
            options,
            front: CropSession::new(shape),
            back: CropSession::new(shape),
        }
    }

    /// Start editing an existing coin from its stored images.
    pub fn from_stored(
        front: SourceImage,
        back: Option<SourceImage>,
        shape: CropShape,
        options: NormalizeOptions,
    ) -> Result<Self, SessionError> {
        let front = CropSession::from_stored(front, shape, &options)?;
        let back = match back {
            Some(image) => CropSession::from_stored(image, shape, &options)?,
            None => CropSession::new(shape),
        };
        Ok(Self {
            shape,
            options,
            front,
            back,
        })
    }

    pub fn shape(&self) -> CropShape {
        self.shape
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn side(&self, side: CoinSide) -> &CropSession {
        match side {
            CoinSide::Front => &self.front,
            CoinSide::Back => &self.back,
        }
    }

    fn side_mut(&mut self, side: CoinSide) -> &mut CropSession {
        match side {
            CoinSide::Front => &mut self.front,
            CoinSide::Back => &mut self.back,
        }
    }

    pub fn begin(&mut self, side: CoinSide, image: SourceImage) {
        self.side_mut(side).begin(image);
    }

    /// Confirm the pending crop of `side` with the session's shape.
    pub fn confirm(
        &mut self,
        side: CoinSide,
        region: CropRegion,
    ) -> Result<&NormalizedImage, SessionError> {
        let (shape, options) = (self.shape, self.options.clone());
        self.side_mut(side).confirm(region, shape, &options)
    }

    /// Abandon pending images on both sides. Returns whether any was discarded.
    pub fn cancel(&mut self) -> bool {
        let front = self.front.cancel();
        let back = self.back.cancel();
        front || back
    }

    /// Remove the back photo entirely.
    pub fn remove_back(&mut self) {
        self.back.clear();
    }

    /// Change the shared shape and re-derive both sides.
    ///
    /// Both sides are re-derived before anything is stored, so a failure on
    /// either leaves the session unchanged.
    pub fn set_shape(&mut self, shape: CropShape) -> Result<(), SessionError> {
        let front = self.front.rederive(shape, &self.options)?;
        let back = self.back.rederive(shape, &self.options)?;
        self.front.install(shape, front);
        self.back.install(shape, back);
        self.shape = shape;
        Ok(())
    }

    /// Encode confirmed outputs as base64 fields for the coin record.
    pub fn payloads(&self) -> Result<CoinImagePayload, SessionError> {
        let front = self.front.output().ok_or(SessionError::MissingFront)?;
        let back_image_base64 = self
            .back
            .output()
            .map(|out| encode_png(out).map(|p| p.to_base64()))
            .transpose()?;

        Ok(CoinImagePayload {
            front_image_base64: encode_png(front)?.to_base64(),
            back_image_base64,
            crop_shape: self.shape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RectOverflow;
    use crate::crop::normalize;
    use crate::decode::decode_data_url;
    use crate::test_support::gradient_source;

    fn region() -> CropRegion {
        CropRegion::new(10.0, 10.0, 300.0, 200.0)
    }

    fn confirmed_session(shape: CropShape) -> CropSession {
        let mut session = CropSession::new(shape);
        session.begin(gradient_source(400, 300));
        session
            .confirm(region(), shape, &NormalizeOptions::default())
            .unwrap();
        session
    }

    #[test]
    fn test_confirm_without_pending() {
        let mut session = CropSession::default();
        let result = session.confirm(region(), CropShape::Square, &NormalizeOptions::default());
        assert!(matches!(result, Err(SessionError::NothingPending)));
    }

    #[test]
    fn test_confirm_records_original_and_region() {
        let session = confirmed_session(CropShape::Square);

        assert!(session.is_confirmed());
        assert!(!session.has_pending());
        assert_eq!(session.region(), Some(&region()));
        assert_eq!(session.original().map(|o| (o.width, o.height)), Some((400, 300)));
        assert_eq!(session.output().map(|o| (o.width, o.height)), Some((200, 200)));
    }

    #[test]
    fn test_failed_confirm_keeps_pending() {
        let mut session = CropSession::default();
        session.begin(gradient_source(50, 50));

        let bad = CropRegion::new(0.0, 0.0, 0.0, 10.0);
        let err = session
            .confirm(bad, CropShape::Square, &NormalizeOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidRegion");
        assert!(session.has_pending());
        assert!(!session.is_confirmed());

        // Re-prompt succeeds with the same pending image
        session
            .confirm(CropRegion::full(50, 50), CropShape::Square, &NormalizeOptions::default())
            .unwrap();
        assert!(session.is_confirmed());
    }

    #[test]
    fn test_cancel_keeps_previous_crop() {
        let mut session = confirmed_session(CropShape::Circle);
        let before = session.output().cloned();

        session.begin(gradient_source(10, 10));
        assert!(session.cancel());
        assert!(!session.cancel());
        assert_eq!(session.output().cloned(), before);
    }

    #[test]
    fn test_set_shape_rederives_from_original() {
        let mut session = confirmed_session(CropShape::Square);
        let opts = NormalizeOptions::default();

        for shape in [CropShape::Rect, CropShape::Circle, CropShape::Square] {
            let out = session.set_shape(shape, &opts).unwrap().cloned().unwrap();
            let expected = normalize(&gradient_source(400, 300), &region(), shape).unwrap();
            assert_eq!(out, expected, "{shape}");
            assert_eq!(session.shape(), shape);
            assert_eq!(session.region(), Some(&region()));
        }
    }

    #[test]
    fn test_set_shape_without_confirmed_crop() {
        let mut session = CropSession::default();
        let out = session
            .set_shape(CropShape::Circle, &NormalizeOptions::default())
            .unwrap();
        assert!(out.is_none());
        assert_eq!(session.shape(), CropShape::Circle);
    }

    #[test]
    fn test_failed_set_shape_changes_nothing() {
        let mut session = confirmed_session(CropShape::Square);
        let before = session.output().cloned();
        let opts = NormalizeOptions::default().with_rect_overflow(RectOverflow::Reject);

        let err = session.set_shape(CropShape::Rect, &opts).unwrap_err();
        assert_eq!(err.kind(), "RegionTooNarrow");
        assert_eq!(session.shape(), CropShape::Square);
        assert_eq!(session.output().cloned(), before);
    }

    #[test]
    fn test_from_stored_uses_full_region() {
        let stored = gradient_source(80, 80);
        let session =
            CropSession::from_stored(stored.clone(), CropShape::Square, &NormalizeOptions::default())
                .unwrap();

        assert_eq!(session.region(), Some(&CropRegion::full(80, 80)));
        // Re-normalizing a stored square with the same shape leaves it as is
        assert_eq!(session.output().map(|o| &o.pixels), Some(&stored.pixels));
    }

    #[test]
    fn test_coin_side_parse() {
        assert_eq!("front".parse::<CoinSide>().unwrap(), CoinSide::Front);
        assert_eq!("Back".parse::<CoinSide>().unwrap(), CoinSide::Back);
        assert_eq!("reverse".parse::<CoinSide>().unwrap(), CoinSide::Back);
        assert!(matches!(
            "edge".parse::<CoinSide>(),
            Err(SessionError::UnknownSide(_))
        ));
        assert_eq!(CoinSide::Front.as_str(), "front");
    }

    #[test]
    fn test_coin_session_requires_front() {
        let mut coin = CoinCropSession::new(CropShape::Rect, NormalizeOptions::default());
        coin.begin(CoinSide::Back, gradient_source(100, 100));
        coin.confirm(CoinSide::Back, CropRegion::full(100, 100)).unwrap();

        assert!(matches!(coin.payloads(), Err(SessionError::MissingFront)));
    }

    #[test]
    fn test_coin_session_payloads() {
        let mut coin = CoinCropSession::new(CropShape::Circle, NormalizeOptions::default());
        coin.begin(CoinSide::Front, gradient_source(120, 100));
        coin.confirm(CoinSide::Front, CropRegion::new(0.0, 0.0, 120.0, 100.0))
            .unwrap();

        let payload = coin.payloads().unwrap();
        assert_eq!(payload.crop_shape, CropShape::Circle);
        assert!(payload.back_image_base64.is_none());

        let front = decode_data_url(&payload.front_image_base64).unwrap();
        assert_eq!((front.width, front.height), (100, 100));
        assert_eq!(front.pixel(0, 0).unwrap()[3], 0);
    }

    #[test]
    fn test_coin_session_payload_field_names() {
        let payload = CoinImagePayload {
            front_image_base64: "AAAA".to_string(),
            back_image_base64: None,
            crop_shape: CropShape::Square,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["frontImageBase64"], "AAAA");
        assert!(json["backImageBase64"].is_null());
        assert_eq!(json["cropShape"], "square");
    }

    #[test]
    fn test_coin_session_shape_change_rederives_both() {
        let mut coin = CoinCropSession::new(CropShape::Rect, NormalizeOptions::default());
        coin.begin(CoinSide::Front, gradient_source(400, 300));
        coin.confirm(CoinSide::Front, region()).unwrap();
        coin.begin(CoinSide::Back, gradient_source(300, 300));
        coin.confirm(CoinSide::Back, CropRegion::new(0.0, 0.0, 150.0, 250.0))
            .unwrap();

        coin.set_shape(CropShape::Square).unwrap();

        assert_eq!(coin.shape(), CropShape::Square);
        for side in [CoinSide::Front, CoinSide::Back] {
            let s = coin.side(side);
            assert_eq!(s.shape(), CropShape::Square);
            let out = s.output().unwrap();
            assert_eq!(out.width, out.height);
        }
    }

    #[test]
    fn test_coin_session_failed_shape_change_is_atomic() {
        let opts = NormalizeOptions::default().with_rect_overflow(RectOverflow::Reject);
        let mut coin = CoinCropSession::new(CropShape::Square, opts);
        coin.begin(CoinSide::Front, gradient_source(500, 300));
        coin.confirm(CoinSide::Front, CropRegion::new(0.0, 0.0, 500.0, 200.0))
            .unwrap();
        coin.begin(CoinSide::Back, gradient_source(300, 300));
        coin.confirm(CoinSide::Back, CropRegion::full(300, 300)).unwrap();

        // Front fits 2:1, back does not
        assert!(coin.set_shape(CropShape::Rect).is_err());
        assert_eq!(coin.shape(), CropShape::Square);
        assert_eq!(coin.side(CoinSide::Front).shape(), CropShape::Square);
        assert_eq!(coin.side(CoinSide::Front).output().unwrap().width, 200);
    }

    #[test]
    fn test_coin_session_remove_back() {
        let mut coin = CoinCropSession::from_stored(
            gradient_source(40, 20),
            Some(gradient_source(30, 30)),
            CropShape::Rect,
            NormalizeOptions::default(),
        )
        .unwrap();
        assert!(coin.side(CoinSide::Back).is_confirmed());

        coin.remove_back();
        assert!(!coin.side(CoinSide::Back).is_confirmed());
        assert!(coin.payloads().unwrap().back_image_base64.is_none());
    }

    #[test]
    fn test_coin_session_cancel() {
        let mut coin = CoinCropSession::default();
        assert!(!coin.cancel());
        coin.begin(CoinSide::Back, gradient_source(5, 5));
        assert!(coin.cancel());
        assert!(!coin.side(CoinSide::Back).has_pending());
    }
}
