//! Session-level error type.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::render::ContextError;
use crate::viewport::Dimensions;

/// Everything an editor session can fail with.
///
/// Only `Encode` is retryable: the session stays open and the export can be
/// attempted again. `Decode` aborts the session before it exists. `Context`
/// means the environment could not provide a drawing surface.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to decode source image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Drawing surface unavailable: {0}")]
    Context(#[from] ContextError),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] EncodeError),

    #[error(
        "Invalid viewport: preview {}x{}, export {}x{}",
        preview.width, preview.height, export.width, export.height
    )]
    InvalidViewport {
        preview: Dimensions,
        export: Dimensions,
    },

    #[error("Editor session is closed")]
    SessionClosed,

    #[error("Export result belongs to an earlier session (epoch {job}, current {current})")]
    StaleExport { job: u64, current: u64 },
}

impl EditorError {
    /// Whether re-invoking the failed action can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EditorError::Encode(_))
    }
}
