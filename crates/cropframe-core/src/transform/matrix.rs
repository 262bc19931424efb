//! The single image → viewport transform shared by preview and export.
//!
//! Transform stack, outermost first:
//!
//! ```text
//! translate(viewport center)
//!   * rotate(rotation)
//!   * scale(zoom)
//!   * translate(pan / zoom)
//!   * translate(-cover / 2)
//!   * scale(cover / image)
//! ```
//!
//! Pan is divided by zoom so that, after the zoom scale is applied, a pan of
//! `n` pixels moves the image by `n` viewport pixels at any zoom level. Pan is
//! applied inside the rotation, so it is expressed in the rotated frame.

use kurbo::{Affine, Point, Size};

use super::TransformState;
use crate::fit::cover_for;

/// Map image-pixel coordinates into viewport coordinates.
///
/// `image` is the intrinsic image size and `viewport` the surface being drawn
/// to. Preview and export call this with their own viewport size; export
/// first rescales the pan with [`TransformState::rescaled`].
pub fn compute_transform(state: &TransformState, image: Size, viewport: Size) -> Affine {
    let fit = cover_for(image.width, image.height, viewport.width, viewport.height);
    let zoom = state.zoom();
    let (cos, sin) = state.rotation().cos_sin();

    Affine::translate((viewport.width / 2.0, viewport.height / 2.0))
        * Affine::new([cos, sin, -sin, cos, 0.0, 0.0])
        * Affine::scale(zoom)
        * Affine::translate(state.pan() / zoom)
        * Affine::translate((-fit.draw_width / 2.0, -fit.draw_height / 2.0))
        * Affine::scale_non_uniform(fit.draw_width / image.width, fit.draw_height / image.height)
}

/// Image coordinate shown at `point` of the viewport.
pub fn image_point_at(state: &TransformState, image: Size, viewport: Size, point: Point) -> Point {
    compute_transform(state, image, viewport).inverse() * point
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::ZoomRange;
    use kurbo::Vec2;

    const IMAGE: Size = Size::new(2000.0, 1000.0);
    const VIEWPORT: Size = Size::new(400.0, 400.0);

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            (actual - expected).hypot() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_default_centers_image() {
        let state = TransformState::default();
        let m = compute_transform(&state, IMAGE, VIEWPORT);

        assert_point_eq(m * Point::new(1000.0, 500.0), Point::new(200.0, 200.0));
        // Cover is 800x400, so x 500..1500 of the image spans the viewport
        assert_point_eq(m * Point::new(500.0, 0.0), Point::new(0.0, 0.0));
        assert_point_eq(m * Point::new(1500.0, 1000.0), Point::new(400.0, 400.0));
    }

    #[test]
    fn test_zoom_scales_about_center() {
        let mut state = TransformState::default();
        state.set_zoom(2.0);
        let m = compute_transform(&state, IMAGE, VIEWPORT);

        assert_point_eq(m * Point::new(1000.0, 500.0), Point::new(200.0, 200.0));
        assert_point_eq(m * Point::new(750.0, 250.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_pan_speed_is_independent_of_zoom() {
        let center = Point::new(1000.0, 500.0);
        for zoom in [0.5, 1.0, 2.0, 3.0] {
            let mut state = TransformState::default();
            state.set_zoom(zoom);
            state.set_pan(Vec2::new(10.0, -5.0));
            let m = compute_transform(&state, IMAGE, VIEWPORT);
            assert_point_eq(m * center, Point::new(210.0, 195.0));
        }
    }

    #[test]
    fn test_rotation_turns_clockwise() {
        let mut state = TransformState::default();
        state.rotate90();
        let m = compute_transform(&state, IMAGE, VIEWPORT);

        // Top-left corner of the cover rect (-400, -200) rotates to (200, -400)
        assert_point_eq(m * Point::new(0.0, 0.0), Point::new(400.0, -200.0));
        assert_point_eq(m * Point::new(1000.0, 500.0), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_pan_is_applied_in_rotated_frame() {
        let mut state = TransformState::default();
        state.rotate90();
        state.set_pan(Vec2::new(10.0, 0.0));
        let m = compute_transform(&state, IMAGE, VIEWPORT);

        assert_point_eq(m * Point::new(1000.0, 500.0), Point::new(200.0, 210.0));
    }

    #[test]
    fn test_image_point_at_inverts() {
        let mut state = TransformState::new(ZoomRange::default());
        state.set_zoom(1.5);
        state.rotate90();
        state.rotate90();
        state.set_pan(Vec2::new(-33.0, 12.5));

        let m = compute_transform(&state, IMAGE, VIEWPORT);
        let image_point = Point::new(640.0, 310.0);
        let on_screen = m * image_point;
        assert_point_eq(
            image_point_at(&state, IMAGE, VIEWPORT, on_screen),
            image_point,
        );
    }

    #[test]
    fn test_export_at_scale_matches_preview() {
        let preview = VIEWPORT;
        let export = Size::new(1200.0, 1200.0);

        let mut state = TransformState::default();
        state.set_zoom(1.3);
        state.set_pan(Vec2::new(10.0, -5.0));
        let export_state = state.rescaled(preview, export);
        assert_eq!(export_state.pan(), Vec2::new(30.0, -15.0));

        for p in [
            Point::new(0.5, 0.5),
            Point::new(123.0, 321.0),
            Point::new(399.5, 200.0),
        ] {
            let from_preview = image_point_at(&state, IMAGE, preview, p);
            let from_export = image_point_at(&export_state, IMAGE, export, Point::new(p.x * 3.0, p.y * 3.0));
            assert_point_eq(from_export, from_preview);
        }
    }

    #[test]
    fn test_unscaled_pan_diverges_at_export() {
        let preview = VIEWPORT;
        let export = Size::new(1200.0, 1200.0);

        let mut state = TransformState::default();
        state.set_pan(Vec2::new(10.0, -5.0));

        let p = Point::new(200.0, 200.0);
        let from_preview = image_point_at(&state, IMAGE, preview, p);
        let wrong = image_point_at(&state, IMAGE, export, Point::new(600.0, 600.0));
        assert!((wrong - from_preview).hypot() > 1.0);
    }
}
