//! JPEG encoding of the final crop.
//!
//! JPEG has no alpha channel, so RGBA frames are composited onto a solid
//! background before encoding (see [`flatten_rgba`]).

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate_buffer, EncodeError};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` / `height` - Image dimensions in pixels
/// * `quality` - JPEG quality (1-100); out-of-range values are clamped
///
/// # Errors
///
/// `InvalidDimensions` for a zero dimension, `InvalidPixelData` when the
/// buffer length is not `width * height * 3`, `EncodingFailed` if the codec
/// rejects the data.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height, 3)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Composite straight-alpha RGBA pixels over an opaque background, producing RGB.
pub fn flatten_rgba(rgba: &[u8], background: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for channel in 0..3 {
            let fg = px[channel] as u32 * alpha;
            let bg = background[channel] as u32 * (255 - alpha);
            rgb.push(((fg + bg + 127) / 255) as u8);
        }
    }
    rgb
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: valid input always yields a complete JPEG stream.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 1u8..=100,
        ) {
            let pixels = vec![128u8; (width * height * 3) as usize];
            let jpeg = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: flattening always yields three bytes per input pixel.
        #[test]
        fn prop_flatten_length(pixels in proptest::collection::vec(any::<u8>(), 0..64)) {
            let usable = pixels.len() / 4 * 4;
            let rgb = flatten_rgba(&pixels[..usable], [0, 0, 0]);
            prop_assert_eq!(rgb.len(), usable / 4 * 3);
        }
    }
}
