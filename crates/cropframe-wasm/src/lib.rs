//! Cropframe WASM - WebAssembly bindings for the cropframe editor
//!
//! This crate exposes the cropframe-core editing session to JavaScript /
//! TypeScript. It holds no geometry of its own.
//!
//! # Module Structure
//!
//! - `session` - `JsEditorSession`: input, preview frames, confirm and close
//! - `encode` - `JsEncodedImage`, the confirmed output
//! - `export` - `JsExportJob` / `JsExportCompletion` for the split export
//! - `fit` - standalone cover-fit calculation
//! - `types` - conversion of JavaScript objects into core types
//! - `logger` - console backend for the `log` facade
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession } from '@cropframe/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsEditorSession(bytes, spec);
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod export;
mod fit;
mod logger;
mod session;
mod types;

pub use encode::JsEncodedImage;
pub use export::{JsExportCompletion, JsExportJob};
pub use fit::cover_fit;
pub use logger::set_log_level;
pub use session::JsEditorSession;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
