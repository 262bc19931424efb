//! Cover-fit calculation for hosts that lay out their own UI.

use cropframe_core::fit;
use wasm_bindgen::prelude::*;

/// Cover draw dimensions for an image in a target rectangle.
///
/// Returns `[drawWidth, drawHeight]`.
///
/// ```typescript
/// const [w, h] = cover_fit(2000, 1000, 400, 400); // [800, 400]
/// ```
#[wasm_bindgen]
pub fn cover_fit(
    image_width: f64,
    image_height: f64,
    target_width: f64,
    target_height: f64,
) -> Result<Vec<f64>, JsValue> {
    if ![image_width, image_height, target_width, target_height]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
    {
        return Err(JsValue::from_str("cover_fit: all dimensions must be positive"));
    }
    let size = fit::cover_for(image_width, image_height, target_width, target_height);
    Ok(vec![size.draw_width, size.draw_height])
}
