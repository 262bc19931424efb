//! One editing session: a decoded source, its transform and both renderers.
//!
//! The session owns everything exclusively. Input mutates the transform
//! synchronously and schedules a preview redraw; the host calls
//! [`EditorSession::on_animation_frame`] once per frame to run it.
//!
//! Export is split in three so the encode can run off the main loop:
//!
//! 1. [`EditorSession::begin_export`] renders the export frame and stamps it
//!    with the current epoch.
//! 2. [`ExportJob::encode`] produces the output bytes.
//! 3. [`EditorSession::finish_export`] accepts the result only if the epoch
//!    still matches.
//!
//! [`EditorSession::close`] bumps the epoch, so a completion that arrives
//! after the editor was closed is rejected instead of acting on it.

use kurbo::Point;

use crate::config::EditorConfig;
use crate::decode::{decode_image, ImageSource};
use crate::encode::EncodedImage;
use crate::error::EditorError;
use crate::render::{ContextError, ExportCompletion, ExportJob, ExportRenderer, PreviewRenderer, Surface};
use crate::transform::{InputController, InputEvent, TransformState};
use crate::viewport::ViewportSpec;

#[derive(Debug)]
pub struct EditorSession {
    source: Option<ImageSource>,
    spec: ViewportSpec,
    config: EditorConfig,
    input: InputController,
    preview: PreviewRenderer,
    export: ExportRenderer,
    epoch: u64,
}

impl EditorSession {
    /// Decode `bytes` and open a session on the result.
    pub fn open(bytes: &[u8], spec: ViewportSpec, config: EditorConfig) -> Result<Self, EditorError> {
        let source = decode_image(bytes)?;
        Self::from_source(source, spec, config)
    }

    /// Open a session on an already decoded image.
    ///
    /// The first preview frame is scheduled immediately.
    pub fn from_source(
        source: ImageSource,
        spec: ViewportSpec,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        spec.validate()?;
        let config = config.validated();

        let surface = Surface::new(spec.preview_size.width, spec.preview_size.height)
            .map_err(log_context_error)?;
        let mut preview = PreviewRenderer::new(surface, spec.shape, config.preview_filter);
        preview.invalidate();

        let export = ExportRenderer::new(
            spec.export_size.width,
            spec.export_size.height,
            spec.shape,
            config.export_filter,
        );
        let input = InputController::new(
            TransformState::new(config.zoom_range()),
            config.input_steps(),
        );

        log::debug!(
            "opened editor: source {}x{}, preview {}x{}, export {}x{}, {:?}",
            source.width(),
            source.height(),
            spec.preview_size.width,
            spec.preview_size.height,
            spec.export_size.width,
            spec.export_size.height,
            spec.shape
        );

        Ok(Self {
            source: Some(source),
            spec,
            config,
            input,
            preview,
            export,
            epoch: 0,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    pub fn spec(&self) -> &ViewportSpec {
        &self.spec
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &TransformState {
        self.input.state()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn source(&self) -> Option<&ImageSource> {
        self.source.as_ref()
    }

    /// The preview surface as last drawn.
    pub fn preview(&self) -> &Surface {
        self.preview.surface()
    }

    /// Whether a redraw is waiting for the next animation frame. Hosts can
    /// skip requesting a frame while this is false.
    pub fn has_pending_frame(&self) -> bool {
        self.preview.has_pending_frame()
    }

    /// Apply one input event. Returns true if the transform changed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        self.mutate(|input| input.handle(event))
    }

    pub fn set_zoom(&mut self, value: f64) -> bool {
        self.mutate(|input| input.set_zoom(value))
    }

    pub fn rotate90(&mut self) -> bool {
        self.mutate(|input| {
            input.rotate90();
            true
        })
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        if !self.is_closed() {
            self.input.begin_drag(pointer);
        }
    }

    pub fn drag_to(&mut self, pointer: Point) -> bool {
        self.mutate(|input| input.drag_to(pointer))
    }

    pub fn end_drag(&mut self) {
        self.input.end_drag();
    }

    pub fn reset(&mut self) -> bool {
        self.mutate(|input| {
            let changed = !input.state().is_default();
            input.reset();
            changed
        })
    }

    fn mutate(&mut self, f: impl FnOnce(&mut InputController) -> bool) -> bool {
        if self.is_closed() {
            log::warn!("ignoring input on closed editor");
            return false;
        }
        let changed = f(&mut self.input);
        if changed {
            self.preview.invalidate();
        }
        changed
    }

    /// Run the pending preview redraw, if any. Returns true if it drew.
    pub fn on_animation_frame(&mut self) -> bool {
        let Some(source) = &self.source else {
            return false;
        };
        self.preview.on_animation_frame(source, self.input.state())
    }

    /// Render the export frame for the current transform.
    pub fn begin_export(&self) -> Result<ExportJob, EditorError> {
        let source = self.source.as_ref().ok_or(EditorError::SessionClosed)?;
        let frame = self
            .export
            .render(source, self.input.state(), self.spec.preview_size.to_size())
            .map_err(log_context_error)?;

        log::debug!("export {} started", self.epoch);
        Ok(ExportJob::new(
            self.epoch,
            frame,
            self.config.output,
            self.config.background,
        ))
    }

    /// Accept an encoded export. Rejects completions from an earlier epoch.
    ///
    /// An encode failure leaves the session untouched; the caller may export
    /// again.
    pub fn finish_export(&self, completion: ExportCompletion) -> Result<EncodedImage, EditorError> {
        if completion.epoch != self.epoch {
            log::warn!(
                "dropping stale export from epoch {} (current {})",
                completion.epoch,
                self.epoch
            );
            return Err(EditorError::StaleExport {
                job: completion.epoch,
                current: self.epoch,
            });
        }

        let image = completion.result.map_err(|err| {
            log::warn!("export {} failed to encode: {err}", completion.epoch);
            err
        })?;
        log::debug!(
            "export {} finished: {}x{} {}, {} bytes",
            completion.epoch,
            image.width,
            image.height,
            image.mime_type(),
            image.bytes.len()
        );
        Ok(image)
    }

    /// Render, encode and return the output in one call.
    pub fn confirm(&self) -> Result<EncodedImage, EditorError> {
        let job = self.begin_export()?;
        self.finish_export(job.encode())
    }

    /// End the session without saving.
    ///
    /// Drops the source, resets the transform, cancels any scheduled redraw
    /// and invalidates in-flight exports. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.source.take().is_none() {
            return;
        }
        self.preview.cancel_pending();
        self.input.end_drag();
        self.input.reset();
        self.epoch += 1;
        log::debug!("closed editor, epoch now {}", self.epoch);
    }
}

fn log_context_error(err: ContextError) -> ContextError {
    log::error!("drawing surface unavailable: {err}");
    err
}
