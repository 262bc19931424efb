//! Full-resolution export of the current crop.
//!
//! Export redraws the source at the export size with the same transform the
//! preview uses. The only adjustment is the pan, which is stored in preview
//! pixels and is rescaled per axis by `export / preview`.
//!
//! Rendering and encoding are split: [`ExportRenderer::render`] produces a
//! frame, [`ExportJob::encode`] turns it into bytes. The job carries the
//! session epoch it was started in so a completion that arrives after the
//! session was closed can be recognized and dropped.

use kurbo::Size;

use super::raster::{render, InterpolationFilter};
use super::{ContextError, Surface};
use crate::decode::ImageSource;
use crate::encode::{encode_surface, EncodeError, EncodedImage, OutputFormat};
use crate::mask::{ClipMask, ClipShape};
use crate::transform::TransformState;

/// Renders the export frame.
#[derive(Debug, Clone)]
pub struct ExportRenderer {
    width: u32,
    height: u32,
    shape: ClipShape,
    filter: InterpolationFilter,
}

impl ExportRenderer {
    pub fn new(width: u32, height: u32, shape: ClipShape, filter: InterpolationFilter) -> Self {
        Self {
            width,
            height,
            shape,
            filter,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Draw `source` at the export size.
    ///
    /// `preview_state` is the state as edited in a viewport of
    /// `preview_size`; its pan is rescaled before drawing.
    pub fn render(
        &self,
        source: &ImageSource,
        preview_state: &TransformState,
        preview_size: Size,
    ) -> Result<Surface, ContextError> {
        let mut surface = Surface::new(self.width, self.height)?;
        let state = preview_state.rescaled(preview_size, surface.size());
        let clip = ClipMask::resolve(self.shape, surface.size());

        render(&mut surface, source, &state, &clip, self.filter);
        log::debug!(
            "rendered export frame {}x{} (zoom {}, rotation {})",
            self.width,
            self.height,
            state.zoom(),
            state.rotation().degrees()
        );
        Ok(surface)
    }
}

/// A rendered export frame waiting to be encoded.
///
/// Encoding does not touch the session, so a job can be moved to another
/// thread or worker and encoded there.
#[derive(Debug, Clone)]
pub struct ExportJob {
    epoch: u64,
    frame: Surface,
    format: OutputFormat,
    background: [u8; 3],
}

impl ExportJob {
    pub fn new(epoch: u64, frame: Surface, format: OutputFormat, background: [u8; 3]) -> Self {
        Self {
            epoch,
            frame,
            format,
            background,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn encode(&self) -> ExportCompletion {
        ExportCompletion {
            epoch: self.epoch,
            result: encode_surface(&self.frame, self.format, self.background),
        }
    }
}

/// Outcome of [`ExportJob::encode`], tagged with the job's epoch.
#[derive(Debug)]
pub struct ExportCompletion {
    pub epoch: u64,
    pub result: Result<EncodedImage, EncodeError>,
}
