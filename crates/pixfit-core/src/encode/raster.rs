//! Raster encoding to JPEG, PNG and WebP.
//!
//! JPEG is the only quality-parameterized format here. PNG and the pure-Rust
//! WebP encoder are lossless, so they accept a quality factor and ignore it.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::error::ImageError;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::format::OutputFormat;

/// Errors that can occur while encoding a raster.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder cannot produce this format on this build or platform
    #[error("Output format {0} is not supported by the encoder")]
    UnsupportedFormat(OutputFormat),

    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

/// Map a quality factor in (0, 1] to the 1-100 scale JPEG encoders use.
///
/// Out-of-range and NaN inputs are clamped rather than rejected.
pub fn jpeg_quality(quality: f32) -> u8 {
    if quality.is_nan() {
        return 1;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode a decoded image.
///
/// See [`encode_rgb`].
pub fn encode_image(
    image: &DecodedImage,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    encode_rgb(&image.pixels, image.width, image.height, format, quality)
}

/// Encode RGB8 pixel data (row-major, 3 bytes per pixel) into `format`.
///
/// `quality` is a fraction in (0, 1]; it only affects JPEG output.
pub fn encode_rgb(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut out = Vec::new();
    let written = match format {
        OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut out, jpeg_quality(quality))
            .write_image(pixels, width, height, ExtendedColorType::Rgb8),
        OutputFormat::Png => {
            PngEncoder::new_with_quality(&mut out, CompressionType::Best, PngFilter::Adaptive)
                .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
        OutputFormat::Webp => WebPEncoder::new_lossless(&mut out).write_image(
            pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
    };

    written.map_err(|e| match e {
        ImageError::Unsupported(_) => EncodeError::UnsupportedFormat(format),
        other => EncodeError::EncodingFailed {
            format,
            message: other.to_string(),
        },
    })?;

    Ok(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn format_strategy() -> impl Strategy<Value = OutputFormat> {
        prop_oneof![
            Just(OutputFormat::Jpeg),
            Just(OutputFormat::Png),
            Just(OutputFormat::Webp),
        ]
    }

    proptest! {
        /// Valid input always produces a non-empty buffer, for every format.
        #[test]
        fn prop_valid_input_encodes(
            width in 1u32..=24,
            height in 1u32..=24,
            quality in 0.01f32..=1.0,
            format in format_strategy(),
        ) {
            let pixels = vec![128u8; (width * height * 3) as usize];
            let bytes = encode_rgb(&pixels, width, height, format, quality);
            prop_assert!(bytes.is_ok());
            prop_assert!(!bytes.unwrap().is_empty());
        }

        /// Same input, same bytes.
        #[test]
        fn prop_encoding_is_deterministic(
            width in 1u32..=16,
            height in 1u32..=16,
            quality in 0.01f32..=1.0,
            format in format_strategy(),
        ) {
            let pixels: Vec<u8> = (0..width * height * 3).map(|i| (i * 31 % 251) as u8).collect();
            let a = encode_rgb(&pixels, width, height, format, quality).unwrap();
            let b = encode_rgb(&pixels, width, height, format, quality).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Any quality value, however out of range, is clamped and encodes.
        #[test]
        fn prop_any_quality_is_accepted(quality in proptest::num::f32::ANY) {
            let pixels = vec![64u8; 8 * 8 * 3];
            prop_assert!(encode_rgb(&pixels, 8, 8, OutputFormat::Jpeg, quality).is_ok());
        }

        /// Mismatched buffer lengths are rejected before reaching the encoder.
        #[test]
        fn prop_wrong_length_rejected(
            width in 1u32..=16,
            height in 1u32..=16,
            delta in 1usize..=9,
            format in format_strategy(),
        ) {
            let pixels = vec![0u8; (width * height * 3) as usize + delta];
            let result = encode_rgb(&pixels, width, height, format, 0.9);
            let rejected = matches!(result, Err(EncodeError::InvalidPixelData { .. }));
            prop_assert!(rejected);
        }
    }
}
