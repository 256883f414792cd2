//! WASM-compatible wrapper types.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixfit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use pixfit_core::batch::{FileOutcome, ProcessedFile};
use pixfit_core::compress::CompressionResult;
use pixfit_core::decode::{DecodedImage, FilterType};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGB pixel data
    /// (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array. This copies.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup otherwise.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core image. Clones the pixels.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// Result of a size-targeted compression run.
#[wasm_bindgen]
#[derive(Clone)]
pub struct JsCompressionResult {
    inner: CompressionResult,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// Encoded bytes as Uint8Array. This copies.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// Encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> f64 {
        self.inner.size() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.quality
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f32 {
        self.inner.scale
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.attempts
    }

    #[wasm_bindgen(getter)]
    pub fn target_bytes(&self) -> f64 {
        self.inner.target_bytes as f64
    }

    #[wasm_bindgen(getter)]
    pub fn met_target(&self) -> bool {
        self.inner.met_target
    }

    /// MIME type of the produced bytes, e.g. `image/jpeg`
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    /// MIME type the caller asked for
    #[wasm_bindgen(getter)]
    pub fn requested_mime_type(&self) -> String {
        self.inner.requested_format.mime_type().to_string()
    }

    /// Whether JPEG was produced because the requested format failed
    #[wasm_bindgen(getter)]
    pub fn format_fallback(&self) -> bool {
        self.inner.format_fallback()
    }

    /// Whether the produced format honours the quality factor. False for
    /// PNG and WebP, whose size only responds to scaling.
    #[wasm_bindgen(getter)]
    pub fn quality_applies(&self) -> bool {
        self.inner.format.is_lossy()
    }

    /// Output file name for a source called `original_name`
    pub fn file_name(&self, original_name: &str) -> String {
        self.inner.file_name(original_name)
    }
}

impl JsCompressionResult {
    pub(crate) fn from_result(inner: CompressionResult) -> Self {
        Self { inner }
    }
}

/// One processed upload: compressed, skipped or kept as original.
#[wasm_bindgen]
pub struct JsProcessedFile {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
    status: &'static str,
    error: Option<String>,
    result: Option<JsCompressionResult>,
}

#[wasm_bindgen]
impl JsProcessedFile {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// Output bytes as Uint8Array. This copies.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> f64 {
        self.bytes.len() as f64
    }

    /// `"compressed"`, `"skipped"` or `"original"`
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.status.to_string()
    }

    /// Decode error message when the original was kept
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }

    /// Details of the compression run, if one produced the output
    #[wasm_bindgen(getter)]
    pub fn result(&self) -> Option<JsCompressionResult> {
        self.result.clone()
    }
}

impl JsProcessedFile {
    pub(crate) fn from_processed(file: ProcessedFile) -> Self {
        let (status, error, result) = match file.outcome {
            FileOutcome::Compressed(result) => {
                ("compressed", None, Some(JsCompressionResult::from_result(result)))
            }
            FileOutcome::Skipped => ("skipped", None, None),
            FileOutcome::Original(err) => ("original", Some(err.to_string()), None),
        };
        Self {
            name: file.name,
            mime_type: file.mime_type,
            bytes: file.bytes,
            status,
            error,
            result,
        }
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Lanczos3
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfit_core::batch::InputFile;
    use pixfit_core::decode::DecodeError;
    use pixfit_core::OutputFormat;

    fn sample_result(format: OutputFormat, requested: OutputFormat) -> CompressionResult {
        CompressionResult {
            bytes: vec![1, 2, 3, 4],
            quality: 0.85,
            scale: 0.9,
            width: 90,
            height: 45,
            attempts: 3,
            target_bytes: 10,
            met_target: true,
            format,
            requested_format: requested,
        }
    }

    #[test]
    fn test_js_decoded_image_round_trip() {
        let decoded = DecodedImage::new(20, 10, vec![7u8; 20 * 10 * 3]);
        let js_img = JsDecodedImage::from_decoded(decoded);
        assert_eq!(js_img.width(), 20);
        assert_eq!(js_img.height(), 10);
        assert_eq!(js_img.byte_length(), 600);

        let back = js_img.to_decoded();
        assert_eq!(back.width, 20);
        assert_eq!(back.pixels, js_img.pixels());
    }

    #[test]
    fn test_compression_result_getters() {
        let js = JsCompressionResult::from_result(sample_result(
            OutputFormat::Jpeg,
            OutputFormat::Webp,
        ));
        assert_eq!(js.size(), 4.0);
        assert_eq!(js.attempts(), 3);
        assert!(js.met_target());
        assert_eq!(js.mime_type(), "image/jpeg");
        assert_eq!(js.requested_mime_type(), "image/webp");
        assert!(js.format_fallback());
        assert!(js.quality_applies());
        assert_eq!(js.file_name("cat.webp"), "cat.jpg");
    }

    #[test]
    fn test_processed_file_statuses() {
        let compressed = ProcessedFile::from_run(
            InputFile::new("a.png", "image/png", vec![0; 8]),
            Ok(sample_result(OutputFormat::Png, OutputFormat::Png)),
        )
        .unwrap();
        let js = JsProcessedFile::from_processed(compressed);
        assert_eq!(js.status(), "compressed");
        assert_eq!(js.name(), "a.png");
        assert_eq!(js.size(), 4.0);
        assert!(js.error().is_none());
        let result = js.result().unwrap();
        assert!(!result.quality_applies());

        let skipped = ProcessedFile::skipped(InputFile::new("a.txt", "text/plain", vec![1]));
        let js = JsProcessedFile::from_processed(skipped);
        assert_eq!(js.status(), "skipped");
        assert_eq!(js.bytes(), vec![1]);
        assert!(js.result().is_none());

        let original = ProcessedFile::from_run(
            InputFile::new("b.png", "image/png", vec![9, 9]),
            Err(DecodeError::InvalidFormat.into()),
        )
        .unwrap();
        let js = JsProcessedFile::from_processed(original);
        assert_eq!(js.status(), "original");
        assert_eq!(js.mime_type(), "image/png");
        assert!(js.error().is_some());
    }

    #[test]
    fn test_filter_from_u8() {
        assert!(matches!(filter_from_u8(0), FilterType::Nearest));
        assert!(matches!(filter_from_u8(1), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(2), FilterType::Lanczos3));
        assert!(matches!(filter_from_u8(255), FilterType::Bilinear));
    }
}
