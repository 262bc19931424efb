//! Owned RGBA8 drawing surface.

use kurbo::Size;
use thiserror::Error;

/// Largest edge a surface may have, matching common browser canvas limits.
pub const MAX_SURFACE_EDGE: u32 = 16_384;

/// The drawing surface could not be acquired.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("Invalid surface size {width}x{height}: both dimensions must be non-zero")]
    EmptySurface { width: u32, height: u32 },

    #[error("Surface {width}x{height} exceeds the maximum edge of {max} pixels")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("Could not allocate {bytes} bytes for the drawing surface")]
    AllocationFailed { bytes: usize },
}

/// An RGBA8 render target with straight (non-premultiplied) alpha.
///
/// Every pixel starts fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Acquire a transparent surface.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextError`] for zero or oversized dimensions, or when the
    /// pixel buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, ContextError> {
        if width == 0 || height == 0 {
            return Err(ContextError::EmptySurface { width, height });
        }
        if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
            return Err(ContextError::TooLarge {
                width,
                height,
                max: MAX_SURFACE_EDGE,
            });
        }

        let bytes = (width as usize) * (height as usize) * 4;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|_| ContextError::AllocationFailed { bytes })?;
        pixels.resize(bytes, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Make every pixel transparent again.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// RGBA value at (x, y). Coordinates must be in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }
}
