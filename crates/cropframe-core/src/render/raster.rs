//! The one rasterizer behind both preview and export.
//!
//! # Algorithm
//!
//! Inverse mapping: for each surface pixel that the clip mask keeps, the
//! pixel centre is mapped back through the inverse of
//! [`compute_transform`] to image coordinates and the source is sampled
//! there. Pixels outside the clip are never sampled, and pixels whose centre
//! falls outside the image stay transparent.
//!
//! Image coordinates are continuous: source pixel `(i, j)` covers
//! `[i, i + 1) x [j, j + 1)` with its centre at `(i + 0.5, j + 0.5)`.

use serde::{Deserialize, Serialize};

use super::Surface;
use crate::decode::ImageSource;
use crate::mask::ClipMask;
use crate::transform::{compute_transform, TransformState};

/// Interpolation filter for resampling the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation - good for preview rendering.
    #[default]
    Bilinear,
    /// Lanczos3 interpolation - sharper when the image is scaled up.
    Lanczos3,
}

/// Draw `source` onto `surface` under `state`, restricted to `clip`.
///
/// The surface is cleared first; its size is the viewport size handed to
/// [`compute_transform`].
pub fn render(
    surface: &mut Surface,
    source: &ImageSource,
    state: &TransformState,
    clip: &ClipMask,
    filter: InterpolationFilter,
) {
    surface.clear();

    let (width, height) = (surface.width(), surface.height());
    let inverse = compute_transform(state, source.size(), surface.size()).inverse();
    let [a, b, c, d, e, f] = inverse.as_coeffs();

    for y in 0..height {
        let Some((start, end)) = clip.row_span(y, width) else {
            continue;
        };
        let cy = y as f64 + 0.5;

        for x in start..end {
            let coverage = clip.coverage(x, y);
            if coverage <= 0.0 {
                continue;
            }

            let cx = x as f64 + 0.5;
            let src_x = a * cx + c * cy + e;
            let src_y = b * cx + d * cy + f;

            let Some(mut rgba) = sample(source, src_x, src_y, filter) else {
                continue;
            };
            if coverage < 1.0 {
                rgba[3] = (rgba[3] as f32 * coverage).round() as u8;
            }
            surface.put_pixel(x, y, rgba);
        }
    }
}

/// Sample the source at continuous image coordinates.
///
/// Returns `None` when the point lies outside the image.
#[inline]
pub fn sample(
    source: &ImageSource,
    x: f64,
    y: f64,
    filter: InterpolationFilter,
) -> Option<[u8; 4]> {
    let (w, h) = (source.width() as f64, source.height() as f64);
    if !(x >= 0.0 && x < w && y >= 0.0 && y < h) {
        return None;
    }

    // Shift so integer coordinates land on pixel centres
    let (x, y) = (x - 0.5, y - 0.5);
    Some(match filter {
        InterpolationFilter::Bilinear => sample_bilinear(source, x, y),
        InterpolationFilter::Lanczos3 => sample_lanczos3(source, x, y),
    })
}

/// Running premultiplied-alpha sum of weighted samples.
#[derive(Default)]
struct Accumulator {
    rgb: [f64; 3],
    alpha: f64,
    weight: f64,
}

impl Accumulator {
    #[inline]
    fn add(&mut self, px: [u8; 4], weight: f64) {
        let a = px[3] as f64;
        self.rgb[0] += px[0] as f64 * a * weight;
        self.rgb[1] += px[1] as f64 * a * weight;
        self.rgb[2] += px[2] as f64 * a * weight;
        self.alpha += a * weight;
        self.weight += weight;
    }

    fn finish(self) -> [u8; 4] {
        if self.weight <= 0.0 || self.alpha <= 0.0 {
            return [0, 0, 0, 0];
        }
        let alpha = (self.alpha / self.weight).clamp(0.0, 255.0);
        let channel = |v: f64| (v / self.alpha).clamp(0.0, 255.0).round() as u8;
        [
            channel(self.rgb[0]),
            channel(self.rgb[1]),
            channel(self.rgb[2]),
            alpha.round() as u8,
        ]
    }
}

#[inline]
fn clamp_index(i: i64, len: u32) -> u32 {
    i.clamp(0, len as i64 - 1) as u32
}

/// Bilinear interpolation over the 4 nearest pixels, clamped at the edges.
fn sample_bilinear(source: &ImageSource, x: f64, y: f64) -> [u8; 4] {
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let (w, h) = (source.width(), source.height());
    let (xa, xb) = (clamp_index(x0, w), clamp_index(x0 + 1, w));
    let (ya, yb) = (clamp_index(y0, h), clamp_index(y0 + 1, h));

    let mut acc = Accumulator::default();
    acc.add(source.pixel(xa, ya), (1.0 - fx) * (1.0 - fy));
    acc.add(source.pixel(xb, ya), fx * (1.0 - fy));
    acc.add(source.pixel(xa, yb), (1.0 - fx) * fy);
    acc.add(source.pixel(xb, yb), fx * fy);
    acc.finish()
}

/// Lanczos3 interpolation over a 6x6 neighbourhood, clamped at the edges.
fn sample_lanczos3(source: &ImageSource, x: f64, y: f64) -> [u8; 4] {
    let (x0, y0) = (x.floor() as i64, y.floor() as i64);
    let (w, h) = (source.width(), source.height());

    let mut acc = Accumulator::default();
    for ky in -2..=3 {
        let py = y0 + ky;
        let wy = lanczos_weight(y - py as f64, 3.0);
        if wy == 0.0 {
            continue;
        }
        for kx in -2..=3 {
            let px = x0 + kx;
            let weight = lanczos_weight(x - px as f64, 3.0) * wy;
            if weight != 0.0 {
                acc.add(source.pixel(clamp_index(px, w), clamp_index(py, h)), weight);
            }
        }
    }
    acc.finish()
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::ClipShape;
    use kurbo::Vec2;

    /// Solid-colour, fully opaque source.
    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> ImageSource {
        let pixels = (0..width * height)
            .flat_map(|_| [rgb[0], rgb[1], rgb[2], 255])
            .collect();
        ImageSource::from_rgba(width, height, pixels).unwrap()
    }

    /// Left half red, right half blue.
    fn split(width: u32, height: u32) -> ImageSource {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..height {
            for x in 0..width {
                if x < width / 2 {
                    pixels.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 255, 255]);
                }
            }
        }
        ImageSource::from_rgba(width, height, pixels).unwrap()
    }

    #[test]
    fn test_default_state_fills_surface() {
        let source = solid(50, 30, [10, 20, 30]);
        let mut surface = Surface::new(40, 40).unwrap();
        render(
            &mut surface,
            &source,
            &TransformState::default(),
            &ClipMask::None,
            InterpolationFilter::Bilinear,
        );

        for (x, y) in [(0, 0), (39, 0), (0, 39), (39, 39), (20, 20)] {
            assert_eq!(surface.pixel(x, y), [10, 20, 30, 255], "pixel ({x}, {y})");
        }
    }

    #[test]
    fn test_zoom_out_leaves_transparent_border() {
        let source = solid(40, 40, [200, 200, 200]);
        let mut state = TransformState::default();
        state.set_zoom(0.5);
        let mut surface = Surface::new(40, 40).unwrap();
        render(
            &mut surface,
            &source,
            &state,
            &ClipMask::None,
            InterpolationFilter::Bilinear,
        );

        assert_eq!(surface.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(surface.pixel(20, 20), [200, 200, 200, 255]);
    }

    #[test]
    fn test_pan_moves_content() {
        // 100x100 split image in a 100x100 surface: boundary at x = 50
        let source = split(100, 100);
        let mut state = TransformState::default();
        state.set_pan(Vec2::new(20.0, 0.0));
        let mut surface = Surface::new(100, 100).unwrap();
        render(
            &mut surface,
            &source,
            &state,
            &ClipMask::None,
            InterpolationFilter::Bilinear,
        );

        // Boundary moved to x = 70; the left 20 columns are now empty
        assert_eq!(surface.pixel(10, 50)[3], 0);
        assert_eq!(surface.pixel(60, 50), [255, 0, 0, 255]);
        assert_eq!(surface.pixel(80, 50), [0, 0, 255, 255]);
    }

    #[test]
    fn test_rotation_180_mirrors_content() {
        let source = split(100, 100);
        let mut state = TransformState::default();
        state.rotate90();
        state.rotate90();
        let mut surface = Surface::new(100, 100).unwrap();
        render(
            &mut surface,
            &source,
            &state,
            &ClipMask::None,
            InterpolationFilter::Bilinear,
        );

        assert_eq!(surface.pixel(10, 50), [0, 0, 255, 255]);
        assert_eq!(surface.pixel(90, 50), [255, 0, 0, 255]);
    }

    #[test]
    fn test_circular_clip_never_writes_outside() {
        let source = solid(64, 64, [255, 255, 255]);
        let clip = ClipMask::resolve(ClipShape::Circular, kurbo::Size::new(64.0, 64.0));
        let mut surface = Surface::new(64, 64).unwrap();
        render(
            &mut surface,
            &source,
            &TransformState::default(),
            &clip,
            InterpolationFilter::Bilinear,
        );

        for y in 0..64 {
            for x in 0..64 {
                if clip.coverage(x, y) == 0.0 {
                    assert_eq!(surface.pixel(x, y), [0, 0, 0, 0], "leak at ({x}, {y})");
                }
            }
        }
        assert_eq!(surface.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(surface.pixel(32, 32), [255, 255, 255, 255]);
    }

    #[test]
    fn test_sample_outside_image_is_none() {
        let source = solid(4, 4, [1, 1, 1]);
        assert!(sample(&source, -0.1, 1.0, InterpolationFilter::Bilinear).is_none());
        assert!(sample(&source, 4.0, 1.0, InterpolationFilter::Bilinear).is_none());
        assert!(sample(&source, 1.0, f64::NAN, InterpolationFilter::Lanczos3).is_none());
        assert!(sample(&source, 3.99, 3.99, InterpolationFilter::Lanczos3).is_some());
    }

    #[test]
    fn test_bilinear_at_pixel_centre_is_exact() {
        let source = split(4, 1);
        assert_eq!(
            sample(&source, 0.5, 0.5, InterpolationFilter::Bilinear),
            Some([255, 0, 0, 255])
        );
        assert_eq!(
            sample(&source, 3.5, 0.5, InterpolationFilter::Bilinear),
            Some([0, 0, 255, 255])
        );
    }

    #[test]
    fn test_transparent_pixels_do_not_darken_neighbours() {
        // Opaque white next to fully transparent black
        let pixels = vec![255, 255, 255, 255, 0, 0, 0, 0];
        let source = ImageSource::from_rgba(2, 1, pixels).unwrap();
        let mid = sample(&source, 1.0, 0.5, InterpolationFilter::Bilinear).unwrap();

        assert_eq!(&mid[..3], &[255, 255, 255]);
        assert!((mid[3] as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_lanczos_on_solid_colour_is_stable() {
        let source = solid(16, 16, [90, 120, 150]);
        for (x, y) in [(0.2, 0.2), (7.3, 8.9), (15.9, 15.9)] {
            assert_eq!(
                sample(&source, x, y, InterpolationFilter::Lanczos3),
                Some([90, 120, 150, 255])
            );
        }
    }

    #[test]
    fn test_lanczos_weight_properties() {
        assert!((lanczos_weight(0.0, 3.0) - 1.0).abs() < f64::EPSILON);
        assert!(lanczos_weight(3.0, 3.0).abs() < f64::EPSILON);
        assert!((lanczos_weight(1.5, 3.0) - lanczos_weight(-1.5, 3.0)).abs() < 1e-12);
        assert!(lanczos_weight(1.0, 3.0).abs() < 1e-12);
    }
}
