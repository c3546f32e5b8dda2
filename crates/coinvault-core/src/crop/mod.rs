//! Crop normalization for coin photos.
//!
//! Takes a source image, a user-drawn crop region and a target shape, and
//! produces a fixed-aspect raster:
//!
//! | Shape    | Output size            | Mask                 |
//! |----------|------------------------|----------------------|
//! | `Rect`   | `2·side × side`        | none                 |
//! | `Square` | `side × side`          | none                 |
//! | `Circle` | `side × side`          | inscribed circle     |
//!
//! where `side = floor(min(region.width, region.height))`.
//!
//! # Coordinate System
//!
//! - Regions are in source pixels, origin at the top-left corner
//! - Regions are not clamped to the source; reads outside it are transparent

mod mask;
mod normalize;
mod plan;
mod sample;
mod types;

pub use mask::CircleMask;
pub use normalize::{normalize, normalize_with};
pub use plan::{plan_crop, CropPlan};
pub use sample::TRANSPARENT;
pub use types::{CropError, CropRegion, CropShape, NormalizedImage};
