use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors that abort a compression run.
///
/// Missing the byte budget is not one of them: it is reported through
/// [`CompressionResult::met_target`](super::CompressionResult::met_target).
#[derive(Debug, Error)]
pub enum CompressError {
    /// The source bytes could not be decoded. No attempt was made.
    #[error("Failed to decode source image: {0}")]
    Decode(#[from] DecodeError),

    /// The source could not be rendered at the working scale.
    #[error("Failed to render image at working scale: {0}")]
    Render(#[source] DecodeError),

    /// JPEG encoding failed, so there was nothing left to fall back to.
    #[error("Failed to encode candidate: {0}")]
    Encode(#[from] EncodeError),

    #[error("Target size must be at least 1 byte")]
    InvalidTarget,

    #[error("Invalid compression policy: {0}")]
    InvalidPolicy(String),

    #[error("Search finished without producing a candidate")]
    NoCandidate,
}
