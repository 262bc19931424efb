//! Preview/export target description.

use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::mask::ClipShape;

/// Width and height in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

/// Where the editor draws while editing, what it produces, and in which shape.
///
/// `preview_size` and `export_size` are independent; they may differ in both
/// scale and aspect ratio. `export_size` is authoritative for the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSpec {
    pub preview_size: Dimensions,
    pub export_size: Dimensions,
    #[serde(default)]
    pub shape: ClipShape,
}

impl ViewportSpec {
    /// Square, circular-clipped avatar editor.
    pub const fn avatar(preview_edge: u32, export_edge: u32) -> Self {
        Self {
            preview_size: Dimensions::square(preview_edge),
            export_size: Dimensions::square(export_edge),
            shape: ClipShape::Circular,
        }
    }

    /// Rectangular banner / cover-image editor.
    pub const fn banner(preview_size: Dimensions, export_size: Dimensions) -> Self {
        Self {
            preview_size,
            export_size,
            shape: ClipShape::Rectangular,
        }
    }

    /// Both sizes must be non-zero.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.preview_size.is_empty() || self.export_size.is_empty() {
            return Err(EditorError::InvalidViewport {
                preview: self.preview_size,
                export: self.export_size,
            });
        }
        Ok(())
    }
}
