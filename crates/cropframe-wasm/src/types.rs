//! Conversions between JavaScript values and the core's typed inputs.
//!
//! Viewport specs, configs and input events arrive as plain JavaScript
//! objects and are deserialized with `serde-wasm-bindgen`.

use cropframe_core::{EditorConfig, EditorError, InputEvent, ViewportSpec};
use wasm_bindgen::prelude::*;

/// Deserialize `{ previewSize: {width, height}, exportSize: {...}, shape }`.
pub(crate) fn viewport_from_js(value: JsValue) -> Result<ViewportSpec, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid viewport spec: {}", e)))
}

/// Deserialize an optional config object; `undefined` and `null` mean defaults.
pub(crate) fn config_from_js(value: JsValue) -> Result<EditorConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))
}

pub(crate) fn event_from_js(value: JsValue) -> Result<InputEvent, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid input event: {}", e)))
}

pub(crate) fn to_js_error(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
