//! Split export: render on the main thread, encode wherever the host likes.
//!
//! ```typescript
//! const job = session.begin_export();
//! const completion = job.encode();      // may run after any await
//! const result = session.finish_export(completion);
//! ```
//!
//! `finish_export` rejects a completion whose epoch no longer matches the
//! session, which happens once the editor was closed in between.

use cropframe_core::{ExportCompletion, ExportJob};
use wasm_bindgen::prelude::*;

/// A rendered export frame waiting to be encoded.
#[wasm_bindgen]
pub struct JsExportJob {
    inner: ExportJob,
}

#[wasm_bindgen]
impl JsExportJob {
    /// Session epoch the frame was rendered in.
    #[wasm_bindgen(getter)]
    pub fn epoch(&self) -> u64 {
        self.inner.epoch()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.frame().width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.frame().height()
    }

    /// Encode the frame. Never fails here; encode errors are carried in the
    /// completion and reported by `finish_export`.
    pub fn encode(&self) -> JsExportCompletion {
        JsExportCompletion {
            inner: self.inner.encode(),
        }
    }
}

impl From<ExportJob> for JsExportJob {
    fn from(inner: ExportJob) -> Self {
        Self { inner }
    }
}

/// Encoded bytes (or the encode error) tagged with the job's epoch.
///
/// Hand it to `finish_export`, which takes ownership.
#[wasm_bindgen]
pub struct JsExportCompletion {
    inner: ExportCompletion,
}

#[wasm_bindgen]
impl JsExportCompletion {
    #[wasm_bindgen(getter)]
    pub fn epoch(&self) -> u64 {
        self.inner.epoch
    }

    /// False if encoding failed.
    #[wasm_bindgen(getter)]
    pub fn is_ok(&self) -> bool {
        self.inner.result.is_ok()
    }
}

impl JsExportCompletion {
    pub(crate) fn into_inner(self) -> ExportCompletion {
        self.inner
    }
}
