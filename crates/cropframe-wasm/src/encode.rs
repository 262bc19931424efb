//! Encoded export result handed back to JavaScript.

use cropframe_core::EncodedImage;
use wasm_bindgen::prelude::*;

/// Output of a confirmed export.
///
/// `bytes()` copies the encoded buffer into JavaScript memory; wrap it in a
/// `Blob` with `mime_type` to upload or download it.
///
/// ```typescript
/// const result = session.confirm();
/// const blob = new Blob([result.bytes()], { type: result.mime_type });
/// ```
#[wasm_bindgen]
pub struct JsEncodedImage {
    inner: EncodedImage,
}

#[wasm_bindgen]
impl JsEncodedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// `image/jpeg` or `image/png`
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

impl From<EncodedImage> for JsEncodedImage {
    fn from(inner: EncodedImage) -> Self {
        Self { inner }
    }
}
