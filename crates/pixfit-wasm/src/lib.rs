//! Pixfit WASM - WebAssembly bindings for Pixfit
//!
//! This crate exposes the pixfit-core compressor to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `compress` - Async size-targeted compression with progress callbacks
//! - `decode` - Image decoding and resizing bindings
//! - `encode` - Single-shot JPEG/PNG/WebP encoding bindings
//! - `target` - Target-size parsing and output file naming
//! - `types` - WASM-compatible wrapper types
//! - `logger` - `log` facade routed to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image, parse_target_size } from '@pixfit/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = await compress_image(
//!   bytes, file.type, 'image/jpeg', parse_target_size('200KB'),
//! );
//! console.log(`${result.size} bytes after ${result.attempts} attempts`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod decode;
mod encode;
mod logger;
mod target;
mod types;

pub use compress::{compress_file, compress_image};
pub use decode::{clamp_to_width, decode_image, render_scaled, resize};
pub use encode::{encode_image, encode_rgb};
pub use logger::set_log_level;
pub use target::{is_image_mime_type, output_file_name, parse_target_size, target_from_selection};
pub use types::{JsCompressionResult, JsDecodedImage, JsProcessedFile};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
