//! Target-size and file-naming WASM bindings.
//!
//! Sizes cross the boundary as `number` (f64); byte counts stay exact well
//! past any realistic upload size.

use crate::encode::parse_format;
use pixfit_core::{format, target};
use wasm_bindgen::prelude::*;

/// Parse a free-text size such as `"250"`, `"250 KB"` or `"1.5MB"` into bytes.
/// A bare number means kilobytes.
#[wasm_bindgen]
pub fn parse_target_size(input: &str) -> Result<f64, JsValue> {
    target::parse_target_size(input)
        .map(|bytes| bytes as f64)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resolve a size dropdown value to bytes. Presets are whole kilobytes;
/// `"custom"` parses `custom_input` instead.
#[wasm_bindgen]
pub fn target_from_selection(selection: &str, custom_input: &str) -> Result<f64, JsValue> {
    target::target_from_selection(selection, custom_input)
        .map(|bytes| bytes as f64)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Name for the output file: `photo.png` in `image/jpeg` becomes `photo.jpg`.
#[wasm_bindgen]
pub fn output_file_name(name: &str, format: &str) -> Result<String, JsValue> {
    let format = parse_format(format).map_err(|e| JsValue::from_str(&e))?;
    Ok(format::output_file_name(name, format))
}

/// Whether a file's declared type is an image at all.
#[wasm_bindgen]
pub fn is_image_mime_type(mime_type: &str) -> bool {
    format::is_image_mime_type(mime_type)
}
