//! Output encoding for the exported crop.
//!
//! The exported frame is an RGBA8 [`Surface`]. It is encoded either to JPEG
//! (lossy, fixed quality, transparent pixels flattened onto a background) or
//! to PNG (lossless, transparency kept).

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::Surface;

pub use jpeg::{encode_jpeg, flatten_rgba};
pub use png::encode_png;

/// Default JPEG quality on the 1-100 scale (0.9 on a 0-1 scale).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur while encoding the output buffer.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output raster format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg { quality: u8 },
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// An encoded output buffer together with what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Encode a rendered frame.
///
/// `background` is only used for JPEG, where it replaces transparency.
pub fn encode_surface(
    surface: &Surface,
    format: OutputFormat,
    background: [u8; 3],
) -> Result<EncodedImage, EncodeError> {
    let (width, height) = (surface.width(), surface.height());
    let bytes = match format {
        OutputFormat::Jpeg { quality } => {
            let rgb = flatten_rgba(surface.pixels(), background);
            encode_jpeg(&rgb, width, height, quality)?
        }
        OutputFormat::Png => encode_png(surface.pixels(), width, height)?,
    };

    Ok(EncodedImage {
        bytes,
        width,
        height,
        format,
    })
}

fn validate_buffer(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = (width as usize) * (height as usize) * channels;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
