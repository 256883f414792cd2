//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Encode a JsDecodedImage as JPEG, PNG or WebP
//! - [`encode_rgb`] - Encode raw RGB pixel data
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_image } from '@pixfit/wasm';
//!
//! const image = decode_image(bytes, file.type);
//! const jpeg = encode_image(image, 'image/jpeg', 0.8);
//! ```

use crate::types::JsDecodedImage;
use pixfit_core::encode;
use pixfit_core::OutputFormat;
use wasm_bindgen::prelude::*;

/// Parse a format given as MIME type (`image/webp`) or name (`webp`).
pub(crate) fn parse_format(value: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(value).ok_or_else(|| format!("Unsupported output format: {value}"))
}

/// Encode a decoded image.
///
/// # Arguments
///
/// * `format` - `image/jpeg`, `image/png` or `image/webp` (or `jpeg`, `png`, `webp`)
/// * `quality` - Fraction in (0, 1]; only JPEG uses it
///
/// # Errors
///
/// Returns an error for an unknown format or if the encoder fails. No JPEG
/// fallback happens here; that is the compressor's job.
#[wasm_bindgen]
pub fn encode_image(image: &JsDecodedImage, format: &str, quality: f32) -> Result<Vec<u8>, JsValue> {
    let format = parse_format(format).map_err(|e| JsValue::from_str(&e))?;
    encode::encode_image(&image.to_decoded(), format, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGB pixel data (3 bytes per pixel, row-major order).
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// `width * height * 3`, a dimension is zero, or encoding fails.
#[wasm_bindgen]
pub fn encode_rgb(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: &str,
    quality: f32,
) -> Result<Vec<u8>, JsValue> {
    let format = parse_format(format).map_err(|e| JsValue::from_str(&e))?;
    encode::encode_rgb(pixels, width, height, format, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
