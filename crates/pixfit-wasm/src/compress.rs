//! Size-targeted compression WASM bindings.
//!
//! Both entry points are async: the search runs one attempt at a time and
//! yields to the event loop between attempts, so a page driving it on the
//! main thread keeps painting its progress bar.
//!
//! # Example
//!
//! ```typescript
//! import { compress_file, target_from_selection } from '@pixfit/wasm';
//!
//! const target = target_from_selection(select.value, customInput.value);
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = await compress_file(
//!   file.name, file.type, bytes, 'image/webp', target, undefined,
//!   (p) => { bar.value = p.percent; },
//! );
//! if (out.status === 'compressed' && !out.result.met_target) {
//!   console.warn(`${out.name}: smallest result is ${out.size} bytes`);
//! }
//! ```

use js_sys::{Function, Promise};
use pixfit_core::batch::{InputFile, ProcessedFile};
use pixfit_core::compress::{
    CompressError, CompressionPolicy, CompressionResult, CompressionTarget, ImageCodec, Progress,
    SizeSearch,
};
use pixfit_core::format::is_image_mime_type;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::encode::parse_format;
use crate::types::{JsCompressionResult, JsProcessedFile};

#[wasm_bindgen]
extern "C" {
    // Global in both window and worker scopes
    #[wasm_bindgen(js_name = setTimeout)]
    fn set_timeout(handler: &Function, timeout: i32) -> JsValue;
}

/// Let the event loop run before the next attempt.
async fn yield_now() {
    let promise = Promise::new(&mut |resolve, _reject| {
        set_timeout(&resolve, 0);
    });
    // Resolved by a timer; never rejects
    let _ = JsFuture::from(promise).await;
}

/// Progress as handed to the JS callback.
#[derive(Serialize)]
struct ProgressEvent<'a> {
    #[serde(flatten)]
    progress: &'a Progress,
    percent: f64,
}

fn report_progress(callback: &Function, progress: &Progress) {
    let event = ProgressEvent {
        progress,
        percent: progress.percent(),
    };
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    match event.serialize(&serializer) {
        Ok(value) => {
            if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                log::warn!("progress callback threw: {:?}", err);
            }
        }
        Err(err) => log::warn!("could not serialize progress: {}", err),
    }
}

/// Assemble a target from boundary values.
pub(crate) fn build_target(
    output_format: &str,
    target_bytes: f64,
    policy: CompressionPolicy,
) -> Result<CompressionTarget, String> {
    let format = parse_format(output_format)?;
    if !target_bytes.is_finite() || target_bytes < 1.0 {
        return Err(format!("Target size must be at least 1 byte, got {target_bytes}"));
    }
    Ok(CompressionTarget::new(target_bytes.floor() as u64, format).with_policy(policy))
}

/// `undefined` or `null` selects the default policy; partial objects fill in
/// defaults for missing fields.
fn policy_from_js(policy: JsValue) -> Result<CompressionPolicy, JsValue> {
    if policy.is_undefined() || policy.is_null() {
        return Ok(CompressionPolicy::default());
    }
    serde_wasm_bindgen::from_value(policy)
        .map_err(|e| JsValue::from_str(&format!("Invalid compression policy: {e}")))
}

async fn run_search(
    bytes: &[u8],
    mime_hint: Option<&str>,
    target: CompressionTarget,
    on_progress: Option<&Function>,
) -> Result<CompressionResult, CompressError> {
    let mut search = SizeSearch::new(ImageCodec, bytes, mime_hint, target)?;
    while let Some(progress) = search.step()? {
        if let Some(callback) = on_progress {
            report_progress(callback, &progress);
        }
        if !progress.finished {
            yield_now().await;
        }
    }
    search.into_result().ok_or(CompressError::NoCandidate)
}

/// Compress image bytes toward `target_bytes`.
///
/// # Arguments
///
/// * `bytes` - Encoded source image
/// * `mime_hint` - Declared type, used only if the bytes can't be sniffed
/// * `output_format` - `image/jpeg`, `image/png` or `image/webp`
/// * `target_bytes` - Byte budget, at least 1
/// * `policy` - Optional `{ initialQuality, minQuality, qualityStep,
///   scaleFactor, overshootRatio, maxAttempts, maxWorkingWidth, filter }`
/// * `on_progress` - Optional callback receiving one object per attempt
///
/// The promise resolves with the smallest candidate even when it is over
/// budget; check `met_target`.
///
/// PNG and WebP output ignores quality. Scaling only starts while the best
/// result is more than `overshootRatio` times the target, so when the
/// full-size lossless output is over the target by less than that ratio
/// (2 by default) the target is never met: the run steps quality down to
/// the floor (18 attempts with the default policy) and returns the
/// full-size image. Lower `overshootRatio` towards 1 to make
/// such runs scale instead.
///
/// # Errors
///
/// Rejects for an invalid target or policy, undecodable bytes, or a JPEG
/// encoder failure.
#[wasm_bindgen]
pub async fn compress_image(
    bytes: Vec<u8>,
    mime_hint: Option<String>,
    output_format: String,
    target_bytes: f64,
    policy: JsValue,
    on_progress: Option<Function>,
) -> Result<JsCompressionResult, JsValue> {
    let policy = policy_from_js(policy)?;
    let target =
        build_target(&output_format, target_bytes, policy).map_err(|e| JsValue::from_str(&e))?;

    run_search(&bytes, mime_hint.as_deref(), target, on_progress.as_ref())
        .await
        .map(JsCompressionResult::from_result)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compress one uploaded file.
///
/// Non-image files come back untouched with status `"skipped"`; images that
/// fail to decode come back untouched with status `"original"`. Otherwise
/// the file is compressed and renamed for the produced format.
///
/// # Errors
///
/// Rejects only for an invalid target or policy, or a JPEG encoder failure.
#[wasm_bindgen]
pub async fn compress_file(
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
    output_format: String,
    target_bytes: f64,
    policy: JsValue,
    on_progress: Option<Function>,
) -> Result<JsProcessedFile, JsValue> {
    let policy = policy_from_js(policy)?;
    let target =
        build_target(&output_format, target_bytes, policy).map_err(|e| JsValue::from_str(&e))?;
    let file = InputFile::new(name, mime_type, bytes);

    let processed = if is_image_mime_type(&file.mime_type) {
        let hint = Some(file.mime_type.as_str());
        let run = run_search(&file.bytes, hint, target, on_progress.as_ref()).await;
        ProcessedFile::from_run(file, run).map_err(|e| JsValue::from_str(&e.to_string()))?
    } else {
        ProcessedFile::skipped(file)
    };

    Ok(JsProcessedFile::from_processed(processed))
}
