//! Pixfit Core - size-targeted image compression
//!
//! This crate provides the core functionality for Pixfit: decoding uploaded
//! images, re-encoding them as JPEG, PNG or WebP, and searching encoder
//! quality and raster scale until the output fits a byte budget.

pub mod batch;
pub mod compress;
pub mod decode;
pub mod encode;
pub mod format;
pub mod target;

pub use batch::{compress_file, compress_files, FileOutcome, InputFile, ProcessedFile};
pub use compress::{
    compress, compress_image, CompressError, CompressionPolicy, CompressionResult,
    CompressionTarget, ImageCodec, NoProgress, Progress, ProgressSink, RasterCodec, SizeSearch,
};
pub use decode::{DecodeError, DecodedImage, FilterType};
pub use encode::EncodeError;
pub use format::{is_image_mime_type, output_file_name, OutputFormat};
pub use target::{parse_target_size, target_from_selection, TargetSizeError, CUSTOM_SELECTION};
