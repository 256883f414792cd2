//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG, PNG, WebP, GIF or BMP bytes to RGB
//! - [`resize`] - Resize an image to exact dimensions
//! - [`render_scaled`] - Resize by a factor, as the compressor does per attempt
//! - [`clamp_to_width`] - Downscale to a maximum width, preserving aspect ratio
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, clamp_to_width } from '@pixfit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes, file.type);
//! const preview = clamp_to_width(image, 800, 2); // Lanczos3 filter
//! ```

use crate::types::{filter_from_u8, JsDecodedImage};
use pixfit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode image bytes, applying EXIF orientation.
///
/// The format is sniffed from the bytes; `mime_hint` (usually `File.type`)
/// is only used when sniffing fails.
///
/// # Errors
///
/// Returns an error if the bytes are not a readable image or the image has
/// a zero dimension.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], mime_hint: Option<String>) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes, mime_hint.as_deref())
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize by `scale` (clamped to at most 1). Each side keeps at least one
/// pixel.
#[wasm_bindgen]
pub fn render_scaled(
    image: &JsDecodedImage,
    scale: f32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::render_scaled(&image.to_decoded(), scale, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Downscale so the width is at most `max_width`. Narrower images are
/// returned unchanged.
#[wasm_bindgen]
pub fn clamp_to_width(
    image: &JsDecodedImage,
    max_width: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::clamp_to_width(&image.to_decoded(), max_width, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
