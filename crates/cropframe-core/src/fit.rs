//! "Cover" fitting of an image into a target rectangle.
//!
//! The image is scaled, aspect ratio preserved, until it fills the target
//! completely. Whichever dimension overflows is cropped by the viewport;
//! nothing is ever letterboxed.

use serde::{Deserialize, Serialize};

/// Draw dimensions produced by [`cover`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverSize {
    pub draw_width: f64,
    pub draw_height: f64,
}

/// Compute cover draw dimensions.
///
/// If the image is wider than the target (`image_aspect > target_aspect`)
/// the draw height matches the target height and the width overflows
/// (left/right are cropped). Otherwise the draw width matches the target
/// width and the height overflows (top/bottom are cropped).
///
/// Both aspects must be positive. The result never falls below the target
/// in either dimension, even when rounding would say otherwise.
///
/// # Example
///
/// ```
/// use cropframe_core::fit::cover;
///
/// let size = cover(2.0, 1.0, 400.0, 400.0);
/// assert_eq!(size.draw_width, 800.0);
/// assert_eq!(size.draw_height, 400.0);
/// ```
pub fn cover(
    image_aspect: f64,
    target_aspect: f64,
    target_width: f64,
    target_height: f64,
) -> CoverSize {
    if image_aspect > target_aspect {
        CoverSize {
            draw_width: (target_height * image_aspect).max(target_width),
            draw_height: target_height,
        }
    } else {
        CoverSize {
            draw_width: target_width,
            draw_height: (target_width / image_aspect).max(target_height),
        }
    }
}

/// [`cover`] for concrete pixel dimensions.
pub fn cover_for(image_width: f64, image_height: f64, target_width: f64, target_height: f64) -> CoverSize {
    cover(
        image_width / image_height,
        target_width / target_height,
        target_width,
        target_height,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================
