//! Output clip masks.
//!
//! ## Shapes
//!
//! - **Circular**: the largest circle inscribed in the output rectangle (avatars)
//! - **Rectangular**: no clipping beyond the output bounds (banners)
//!
//! The mask is resolved against the surface size before anything is drawn,
//! so the rasterizer can consult it per pixel and never write image data
//! outside the clip region.

pub mod circle;

use kurbo::Size;
use serde::{Deserialize, Serialize};

pub use circle::InscribedCircle;

/// Requested output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipShape {
    Circular,
    #[default]
    Rectangular,
}

/// A clip shape resolved against concrete surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipMask {
    /// Everything inside the surface is kept.
    None,
    Circle(InscribedCircle),
}

impl ClipMask {
    pub fn resolve(shape: ClipShape, bounds: Size) -> Self {
        match shape {
            ClipShape::Circular => ClipMask::Circle(InscribedCircle::new(bounds)),
            ClipShape::Rectangular => ClipMask::None,
        }
    }

    /// Coverage of pixel `(x, y)` from 0.0 (discarded) to 1.0 (kept).
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        match self {
            ClipMask::None => 1.0,
            ClipMask::Circle(circle) => circle.coverage(x, y),
        }
    }

    /// Pixels `[start, end)` of row `y` that may receive image data.
    pub fn row_span(&self, y: u32, width: u32) -> Option<(u32, u32)> {
        match self {
            ClipMask::None => (width > 0).then_some((0, width)),
            ClipMask::Circle(circle) => circle.row_span(y, width),
        }
    }
}
