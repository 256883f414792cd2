//! Size-targeted re-compression.
//!
//! Given encoded image bytes and a byte budget, the compressor decodes the
//! image once and re-encodes it repeatedly, lowering raster scale and encoder
//! quality, until a candidate fits the budget, the quality floor is reached,
//! or the attempt limit runs out. The smallest candidate observed is returned
//! in every case; whether it fits is reported by
//! [`CompressionResult::met_target`], never as an error.
//!
//! # Examples
//!
//! ```ignore
//! use pixfit_core::compress::{compress_image, CompressionTarget};
//! use pixfit_core::OutputFormat;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let target = CompressionTarget::new(100 * 1024, OutputFormat::Jpeg);
//! let result = compress_image(&bytes, Some("image/jpeg"), &target).unwrap();
//! println!("{} bytes, met: {}", result.size(), result.met_target);
//! ```

mod codec;
mod error;
mod policy;
mod result;
mod search;
#[cfg(test)]
pub(crate) mod test_codec;

pub use codec::{ImageCodec, RasterCodec};
pub use error::CompressError;
pub use policy::{
    CompressionPolicy, CompressionTarget, DEFAULT_INITIAL_QUALITY, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_WORKING_WIDTH, DEFAULT_MIN_QUALITY, DEFAULT_OVERSHOOT_RATIO,
    DEFAULT_QUALITY_STEP, DEFAULT_SCALE_FACTOR,
};
pub use result::{CompressionResult, NoProgress, Progress, ProgressSink};
pub use search::{SearchState, SizeSearch};

/// Run a complete search, reporting every attempt to `progress`.
///
/// # Errors
///
/// * [`CompressError::InvalidTarget`] / [`CompressError::InvalidPolicy`] -
///   rejected before decoding
/// * [`CompressError::Decode`] - the source is not a readable image; callers
///   usually keep the original bytes in that case
/// * [`CompressError::Encode`] - JPEG encoding itself failed
pub fn compress<C, P>(
    codec: C,
    bytes: &[u8],
    mime_hint: Option<&str>,
    target: &CompressionTarget,
    mut progress: P,
) -> Result<CompressionResult, CompressError>
where
    C: RasterCodec,
    P: ProgressSink,
{
    let mut search = SizeSearch::new(codec, bytes, mime_hint, target.clone())?;
    while let Some(snapshot) = search.step()? {
        progress.report(&snapshot);
    }
    search.into_result().ok_or(CompressError::NoCandidate)
}

/// [`compress`] with the `image`-crate codec and no progress reporting.
pub fn compress_image(
    bytes: &[u8],
    mime_hint: Option<&str>,
    target: &CompressionTarget,
) -> Result<CompressionResult, CompressError> {
    compress(ImageCodec, bytes, mime_hint, target, NoProgress)
}
