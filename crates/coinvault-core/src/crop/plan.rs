//! Output size and source rectangle for a crop.
//!
//! Every output dimension is derived from the region's shortest side, never
//! from its raw width or height, so squares and circles are always square and
//! rectangles are always exactly 2:1 no matter how the user dragged.
//!
//! The sampled source rectangle has the same size as the output and is
//! centered inside the region:
//!
//! ```text
//! source_x = region.x + (region.width  - out_width)  / 2
//! source_y = region.y + (region.height - out_height) / 2
//! ```

use tracing::{debug, warn};

use super::{CropError, CropRegion, CropShape};
use crate::config::{NormalizeOptions, RectOverflow};

/// Resolved geometry for one crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPlan {
    /// Left edge of the sampled source rectangle (may be negative).
    pub source_x: f64,
    /// Top edge of the sampled source rectangle (may be negative).
    pub source_y: f64,
    /// Output width; equals the sampled source width.
    pub width: u32,
    /// Output height; equals the sampled source height.
    pub height: u32,
    /// Shortest side in whole pixels.
    pub side: u32,
    pub shape: CropShape,
}

/// Plan a crop of `region` into `shape`.
///
/// A fractional shortest side is truncated to whole pixels, like a canvas
/// dimension would be.
///
/// # Errors
///
/// - `InvalidRegion` for non-positive or non-finite geometry, or a shortest
///   side under one pixel
/// - `RegionTooLarge` if the shortest side exceeds `options.max_source_edge`
/// - `RegionTooNarrow` for a rectangle wider than the region under
///   [`RectOverflow::Reject`]
pub fn plan_crop(
    region: &CropRegion,
    shape: CropShape,
    options: &NormalizeOptions,
) -> Result<CropPlan, CropError> {
    if let Err(err) = region.validate() {
        warn!(?region, "Rejecting crop region");
        return Err(err);
    }

    let shortest = region.shortest_side().floor();
    if shortest < 1.0 {
        warn!(?region, "Crop region is smaller than one pixel");
        return Err(CropError::InvalidRegion {
            width: region.width,
            height: region.height,
        });
    }

    let max = options.max_source_edge;
    if shortest > max as f64 {
        return Err(CropError::RegionTooLarge {
            side: shortest.min(u32::MAX as f64) as u32,
            max,
        });
    }

    let side = shortest as u32;
    let (width, height) = shape.output_size(side);

    if width as f64 > region.width {
        match options.rect_overflow {
            RectOverflow::Extend => {
                debug!(
                    region_width = region.width,
                    width, "Rectangle extends past the selected region"
                );
            }
            RectOverflow::Reject => {
                return Err(CropError::RegionTooNarrow {
                    width: region.width,
                    required: width,
                });
            }
        }
    }

    let plan = CropPlan {
        source_x: region.x + (region.width - width as f64) / 2.0,
        source_y: region.y + (region.height - height as f64) / 2.0,
        width,
        height,
        side,
        shape,
    };
    debug!(?plan, "Crop planned");
    Ok(plan)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
