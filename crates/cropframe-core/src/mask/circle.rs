//! Circle inscribed in a rectangle, with anti-aliased edge coverage.

use kurbo::{Point, Size};

/// The largest circle that fits inside a `width x height` rectangle.
///
/// # Coordinate System
/// Pixel `(x, y)` covers `[x, x + 1) x [y, y + 1)`; coverage is evaluated at
/// the pixel centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InscribedCircle {
    pub center: Point,
    pub radius: f64,
}

impl InscribedCircle {
    pub fn new(bounds: Size) -> Self {
        Self {
            center: Point::new(bounds.width / 2.0, bounds.height / 2.0),
            radius: bounds.width.min(bounds.height) / 2.0,
        }
    }

    /// Fraction (0.0 to 1.0) of pixel `(x, y)` inside the circle.
    ///
    /// Uses a one-pixel linear ramp across the boundary: pixels whose centre
    /// is more than half a pixel inside are fully covered, more than half a
    /// pixel outside are not covered at all.
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        let dx = x as f64 + 0.5 - self.center.x;
        let dy = y as f64 + 0.5 - self.center.y;
        let distance = (dx * dx + dy * dy).sqrt();
        (self.radius - distance + 0.5).clamp(0.0, 1.0) as f32
    }

    /// Horizontal pixel range `[start, end)` with non-zero coverage on row `y`.
    ///
    /// Lets the rasterizer skip pixels that will never be drawn.
    pub fn row_span(&self, y: u32, width: u32) -> Option<(u32, u32)> {
        let dy = (y as f64 + 0.5 - self.center.y).abs();
        let reach = self.radius + 0.5;
        if dy >= reach {
            return None;
        }
        let half = (reach * reach - dy * dy).sqrt() + 0.5;
        let start = (self.center.x - half).floor().max(0.0) as u32;
        let end = ((self.center.x + half).ceil().max(0.0) as u32).min(width);
        (start < end).then_some((start, end))
    }
}
