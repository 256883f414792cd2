//! Image encoding for pixfit.
//!
//! This module provides functionality for:
//! - Encoding RGB rasters to JPEG with a fractional quality factor
//! - Lossless PNG and WebP encoding (quality accepted and ignored)
//!
//! # Architecture
//!
//! Encoding is the inner operation of the size search and runs once per
//! attempt. All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use pixfit_core::encode::encode_rgb;
//! use pixfit_core::OutputFormat;
//!
//! let pixels = vec![128u8; 100 * 100 * 3];
//! let jpeg = encode_rgb(&pixels, 100, 100, OutputFormat::Jpeg, 0.9).unwrap();
//! println!("Encoded {} bytes", jpeg.len());
//! ```

mod raster;

pub use raster::{encode_image, encode_rgb, jpeg_quality, EncodeError};
