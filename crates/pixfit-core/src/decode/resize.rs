//! Raster resampling used to render the source at a working size.
//!
//! All functions return new `DecodedImage` values and never modify the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::EmptyImage` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// image's dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image.as_rgb_view().ok_or_else(|| {
        DecodeError::CorruptedFile("pixel buffer does not match dimensions".to_string())
    })?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resized))
}

/// Shrink an image so its width is at most `max_width`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged (no upscaling).
pub fn clamp_to_width(
    image: &DecodedImage,
    max_width: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 {
        return Err(DecodeError::EmptyImage {
            width: 0,
            height: image.height,
        });
    }

    if image.width <= max_width {
        return Ok(image.clone());
    }

    let (width, height) = clamped_dimensions(image.width, image.height, max_width);
    resize(image, width, height, filter)
}

/// Render an image at `scale` times its size in both dimensions.
///
/// A scale of 1.0 (or above) returns a copy of the input.
pub fn render_scaled(
    image: &DecodedImage,
    scale: f32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let (width, height) = scaled_dimensions(image.width, image.height, scale);
    resize(image, width, height, filter)
}

/// Pixel dimensions of a `width x height` raster drawn at `scale`.
///
/// Each edge is rounded and kept at least one pixel wide.
pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    if scale >= 1.0 {
        return (width, height);
    }
    let scale = f64::from(scale.max(0.0));
    let w = ((f64::from(width) * scale).round() as u32).max(1);
    let h = ((f64::from(height) * scale).round() as u32).max(1);
    (w, h)
}

fn clamped_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    let ratio = f64::from(height) / f64::from(width);
    let new_height = (f64::from(max_width) * ratio).round() as u32;
    (max_width, new_height.max(1))
}
