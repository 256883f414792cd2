//! Per-file handling for multi-file uploads.
//!
//! Each file gets its own compression run. Files that are not images are
//! passed through untouched, and images that fail to decode fall back to
//! their original bytes, so a batch always yields one output per input.

use crate::compress::{
    compress, CompressError, CompressionResult, CompressionTarget, Progress, ProgressSink,
    RasterCodec,
};
use crate::decode::DecodeError;
use crate::format::is_image_mime_type;

/// A file as handed over by the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    Compressed(CompressionResult),
    /// The declared type is not an image; nothing was attempted.
    Skipped,
    /// The image could not be decoded; the original bytes are kept.
    Original(DecodeError),
}

/// Output for one input file.
#[derive(Debug)]
pub struct ProcessedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub outcome: FileOutcome,
}

impl ProcessedFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Compressed(_))
    }

    /// Whether the file is at or under the target. Skipped and original
    /// files count only if they already were.
    pub fn met_target(&self, target_bytes: u64) -> bool {
        match &self.outcome {
            FileOutcome::Compressed(result) => result.met_target,
            _ => self.size() <= target_bytes,
        }
    }

    /// Pass a non-image file through untouched.
    pub fn skipped(file: InputFile) -> Self {
        log::info!("skipping {} ({}): not an image", file.name, file.mime_type);
        Self::passthrough(file, FileOutcome::Skipped)
    }

    /// Turn the outcome of a compression run over `file` into an output.
    ///
    /// A decode failure keeps the original bytes; any other error is
    /// returned unchanged.
    pub fn from_run(
        file: InputFile,
        run: Result<CompressionResult, CompressError>,
    ) -> Result<Self, CompressError> {
        match run {
            Ok(result) => Ok(Self {
                name: result.file_name(&file.name),
                mime_type: result.mime_type().to_string(),
                bytes: result.bytes.clone(),
                outcome: FileOutcome::Compressed(result),
            }),
            Err(CompressError::Decode(err)) => {
                log::warn!("keeping original {}: {}", file.name, err);
                Ok(Self::passthrough(file, FileOutcome::Original(err)))
            }
            Err(err) => Err(err),
        }
    }

    fn passthrough(file: InputFile, outcome: FileOutcome) -> Self {
        Self {
            name: file.name,
            mime_type: file.mime_type,
            bytes: file.bytes,
            outcome,
        }
    }
}

/// Compress one file, applying the skip and keep-original rules.
///
/// # Errors
///
/// Only errors that are not about the file itself propagate: an invalid
/// target or policy, or a failing JPEG encoder.
pub fn compress_file<C, P>(
    codec: C,
    file: InputFile,
    target: &CompressionTarget,
    progress: P,
) -> Result<ProcessedFile, CompressError>
where
    C: RasterCodec,
    P: ProgressSink,
{
    if !is_image_mime_type(&file.mime_type) {
        return Ok(ProcessedFile::skipped(file));
    }

    let run = compress(codec, &file.bytes, Some(file.mime_type.as_str()), target, progress);
    ProcessedFile::from_run(file, run)
}

/// Compress files in order, one run each.
///
/// `progress` is called with the index of the file being worked on.
pub fn compress_files<C, F>(
    codec: C,
    files: Vec<InputFile>,
    target: &CompressionTarget,
    mut progress: F,
) -> Result<Vec<ProcessedFile>, CompressError>
where
    C: RasterCodec + Copy,
    F: FnMut(usize, &Progress),
{
    files
        .into_iter()
        .enumerate()
        .map(|(index, file)| {
            compress_file(codec, file, target, |p: &Progress| progress(index, p))
        })
        .collect()
}
