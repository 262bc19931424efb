//! The editor session exposed to JavaScript.
//!
//! # Usage
//!
//! ```typescript
//! const session = new JsEditorSession(bytes, {
//!   previewSize: { width: 400, height: 400 },
//!   exportSize: { width: 1200, height: 1200 },
//!   shape: 'circular',
//! });
//!
//! canvas.onpointerdown = (e) => session.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => session.pointer_move(e.offsetX, e.offsetY);
//! canvas.onpointerup = () => session.pointer_up();
//!
//! function frame() {
//!   if (session.on_animation_frame()) {
//!     ctx.putImageData(
//!       new ImageData(session.preview_pixels(), session.preview_width),
//!       0, 0,
//!     );
//!   }
//!   requestAnimationFrame(frame);
//! }
//! ```
//!
//! `confirm()` renders and encodes in one call. For encoding after an await,
//! use `begin_export` / `finish_export` (see the `export` module).

use cropframe_core::{
    EditorConfig, EditorError, EditorSession, InputEvent, KeyCommand, PointerPhase,
    PointerSource, ViewportSpec,
};
use wasm_bindgen::prelude::*;

use crate::encode::JsEncodedImage;
use crate::export::{JsExportCompletion, JsExportJob};
use crate::types::{config_from_js, event_from_js, to_js_error, viewport_from_js};

#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Decode `bytes` and open an editor for `spec`.
    ///
    /// `config` may be omitted; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8], spec: JsValue, config: JsValue) -> Result<JsEditorSession, JsValue> {
        let spec = viewport_from_js(spec)?;
        let config = config_from_js(config)?;
        Self::open(bytes, spec, config).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn preview_width(&self) -> u32 {
        self.inner.preview().width()
    }

    #[wasm_bindgen(getter)]
    pub fn preview_height(&self) -> u32 {
        self.inner.preview().height()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.state().zoom()
    }

    /// Rotation in degrees: 0, 90, 180 or 270.
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u16 {
        self.inner.state().rotation().degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn pan_x(&self) -> f64 {
        self.inner.state().pan().x
    }

    #[wasm_bindgen(getter)]
    pub fn pan_y(&self) -> f64 {
        self.inner.state().pan().y
    }

    #[wasm_bindgen(getter)]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// True while a redraw is scheduled; request an animation frame only then.
    #[wasm_bindgen(getter)]
    pub fn needs_frame(&self) -> bool {
        self.inner.has_pending_frame()
    }

    /// Apply a serialized input event, e.g. `{ Wheel: -1 }` or
    /// `{ Pointer: { phase: 'Move', source: { Touch: { touches: [...] } } } }`.
    pub fn handle_event(&mut self, event: JsValue) -> Result<bool, JsValue> {
        let event = event_from_js(event)?;
        Ok(self.inner.handle(&event))
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.pointer(PointerPhase::Down, x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.pointer(PointerPhase::Move, x, y)
    }

    pub fn pointer_up(&mut self) {
        self.inner.end_drag();
    }

    /// Zoom slider value.
    pub fn set_zoom(&mut self, value: f64) -> bool {
        self.inner.set_zoom(value)
    }

    pub fn wheel(&mut self, delta_y: f64) -> bool {
        self.inner.handle(&InputEvent::Wheel(delta_y))
    }

    pub fn rotate90(&mut self) -> bool {
        self.inner.rotate90()
    }

    /// Handle a `KeyboardEvent.key`. Returns false for unmapped keys.
    pub fn key(&mut self, key: &str) -> bool {
        KeyCommand::from_key(key).is_some_and(|command| self.inner.handle(&InputEvent::Key(command)))
    }

    pub fn reset(&mut self) -> bool {
        self.inner.reset()
    }

    /// Call from `requestAnimationFrame`. Returns true if the preview was
    /// redrawn and should be copied to the canvas.
    pub fn on_animation_frame(&mut self) -> bool {
        self.inner.on_animation_frame()
    }

    /// Preview RGBA pixels, ready for `new ImageData(...)`.
    pub fn preview_pixels(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.inner.preview().pixels())
    }

    /// Render at export size and encode.
    ///
    /// Encode failures leave the editor usable, so this may be called again.
    pub fn confirm(&self) -> Result<JsEncodedImage, JsValue> {
        self.export().map_err(to_js_error)
    }

    /// Render the export frame for the current transform without encoding it.
    pub fn begin_export(&self) -> Result<JsExportJob, JsValue> {
        self.start_export().map_err(to_js_error)
    }

    /// Accept an encoded export. Fails if the editor was closed since
    /// `begin_export` or if encoding failed; only the latter is retryable.
    pub fn finish_export(&self, completion: JsExportCompletion) -> Result<JsEncodedImage, JsValue> {
        self.complete_export(completion).map_err(to_js_error)
    }

    /// Close without saving. Any later export result is rejected.
    pub fn close(&mut self) {
        self.inner.close();
    }
}

impl JsEditorSession {
    pub(crate) fn open(
        bytes: &[u8],
        spec: ViewportSpec,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        EditorSession::open(bytes, spec, config).map(|inner| Self { inner })
    }

    pub(crate) fn export(&self) -> Result<JsEncodedImage, EditorError> {
        self.inner.confirm().map(JsEncodedImage::from)
    }

    pub(crate) fn start_export(&self) -> Result<JsExportJob, EditorError> {
        self.inner.begin_export().map(JsExportJob::from)
    }

    pub(crate) fn complete_export(
        &self,
        completion: JsExportCompletion,
    ) -> Result<JsEncodedImage, EditorError> {
        self.inner
            .finish_export(completion.into_inner())
            .map(JsEncodedImage::from)
    }

    fn pointer(&mut self, phase: PointerPhase, x: f64, y: f64) -> bool {
        self.inner.handle(&InputEvent::Pointer {
            phase,
            source: PointerSource::Mouse { x, y },
        })
    }
}
