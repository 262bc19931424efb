//! Cropframe Core - interactive image transform and crop engine
//!
//! This crate provides the geometry and rasterization behind avatar and
//! cover-image editors: cover fitting, pan/zoom/rotate transform state driven
//! by pointer input, a coalesced live preview, shape clipping and
//! full-resolution export.
//!
//! Everything runs headless against explicit [`render::Surface`] buffers, so
//! the engine can be driven from tests, a native host or the WASM bindings.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod fit;
pub mod mask;
pub mod render;
pub mod session;
pub mod transform;
pub mod viewport;

pub use config::EditorConfig;
pub use decode::{decode_image, DecodeError, ImageSource};
pub use encode::{EncodeError, EncodedImage, OutputFormat};
pub use error::EditorError;
pub use fit::{cover, cover_for, CoverSize};
pub use mask::{ClipMask, ClipShape};
pub use render::{
    ContextError, ExportCompletion, ExportJob, ExportRenderer, InterpolationFilter,
    PreviewRenderer, Surface,
};
pub use session::EditorSession;
pub use transform::{
    compute_transform, InputController, InputEvent, KeyCommand, PointerCapture, PointerPhase,
    PointerSource, Rotation, TransformState, ZoomRange,
};
pub use viewport::{Dimensions, ViewportSpec};

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_one(width: u32) -> ImageSource {
        let height = width / 2;
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..height {
            for x in 0..width {
                let g = if x < width / 2 { 40 } else { 220 };
                pixels.extend_from_slice(&[0, g, 0, 255]);
            }
        }
        ImageSource::from_rgba(width, height, pixels).unwrap()
    }

    #[test]
    fn test_end_to_end_avatar() {
        let source = two_by_one(2000);
        let fit = cover_for(2000.0, 1000.0, 400.0, 400.0);
        assert_eq!(fit, CoverSize { draw_width: 800.0, draw_height: 400.0 });

        let mut session = EditorSession::from_source(
            source,
            ViewportSpec::avatar(400, 400),
            EditorConfig {
                output: OutputFormat::Png,
                ..EditorConfig::default()
            },
        )
        .unwrap();
        assert!(session.on_animation_frame());

        let job = session.begin_export().unwrap();
        assert_eq!(job.frame().pixels(), session.preview().pixels());

        let image = session.finish_export(job.encode()).unwrap();
        assert_eq!((image.width, image.height), (400, 400));
    }

    #[test]
    fn test_rotation_cycle_and_zoom_clamp() {
        let mut state = TransformState::default();
        for _ in 0..4 {
            state.rotate90();
        }
        assert_eq!(state.rotation(), Rotation::Deg0);

        state.set_zoom(10.0);
        assert_eq!(state.zoom(), 3.0);
        state.set_zoom(0.01);
        assert_eq!(state.zoom(), 0.5);
    }
}
