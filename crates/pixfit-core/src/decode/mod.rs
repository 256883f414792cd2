//! Image decoding and resampling for pixfit.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, WebP, GIF and BMP bytes into RGB rasters
//! - EXIF orientation correction, so photos from phone cameras come out upright
//! - Resampling a raster to a working width or a fractional scale
//!
//! # Architecture
//!
//! Decoding happens once per compression run. Every attempt of the size
//! search renders from the same decoded raster, so scaled renders never
//! accumulate resampling loss.

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, get_orientation};
pub use resize::{clamp_to_width, render_scaled, resize, scaled_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
