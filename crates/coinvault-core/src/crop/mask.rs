//! Circular alpha mask for circle crops.
//!
//! The mask is the circle inscribed in the output canvas. A pixel belongs to
//! the circle when its center lies within the radius; everything else is set
//! to fully transparent. The edge is hard (no feathering) so masked outputs
//! are reproducible byte-for-byte.

/// Circle in output-pixel coordinates.
///
/// # Coordinate System
/// - (0, 0) = top-left corner of the canvas
/// - pixel `(x, y)` is tested at its center `(x + 0.5, y + 0.5)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleMask {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl CircleMask {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius: radius.max(0.0),
        }
    }

    /// Circle of diameter `min(width, height)` centered on the canvas.
    pub fn inscribed(width: u32, height: u32) -> Self {
        Self::new(
            width as f64 / 2.0,
            height as f64 / 2.0,
            width.min(height) as f64 / 2.0,
        )
    }

    /// Check if the pixel at `(x, y)` is inside the circle.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let dx = x as f64 + 0.5 - self.center_x;
        let dy = y as f64 + 0.5 - self.center_y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Clear every pixel outside the circle in an RGBA buffer.
    ///
    /// Pixels inside the circle are left unmodified.
    pub fn apply(&self, pixels: &mut [u8], width: u32, height: u32) {
        for (i, px) in pixels.chunks_exact_mut(4).enumerate() {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            if y >= height {
                break;
            }
            if !self.contains(x, y) {
                px.fill(0);
            }
        }
    }
}
