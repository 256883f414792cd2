//! Decoding of arbitrary encoded image bytes into RGB rasters.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode image bytes of any supported format, applying EXIF orientation.
///
/// The format is sniffed from the leading bytes. `mime_hint` is only
/// consulted when sniffing finds nothing, which matches how browsers treat
/// the declared type of an uploaded file.
///
/// # Errors
///
/// * `DecodeError::InvalidFormat` - neither the bytes nor the hint name a
///   readable format
/// * `DecodeError::CorruptedFile` - the decoder rejected the data
/// * `DecodeError::EmptyImage` - the image has a zero dimension
pub fn decode_image(bytes: &[u8], mime_hint: Option<&str>) -> Result<DecodedImage, DecodeError> {
    let orientation = get_orientation(bytes);

    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        match mime_hint.and_then(ImageFormat::from_mime_type) {
            Some(format) => reader.set_format(format),
            None => return Err(DecodeError::InvalidFormat),
        }
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb = apply_orientation(img, orientation).into_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    log::debug!(
        "decoded {}x{} image ({} bytes, orientation {:?})",
        width,
        height,
        bytes.len(),
        orientation
    );
    Ok(DecodedImage::from_rgb_image(rgb))
}

/// Read the EXIF orientation tag, defaulting to `Normal` when absent.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbImage};

    fn encode_with(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 7) as u8, (y * 5) as u8, 90])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, format)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = encode_with(ImageFormat::Jpeg, 16, 8);
        let img = decode_image(&bytes, None).unwrap();
        assert_eq!((img.width, img.height), (16, 8));
        assert_eq!(img.pixels.len(), 16 * 8 * 3);
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let bytes = encode_with(ImageFormat::Png, 4, 3);
        let img = decode_image(&bytes, Some("image/png")).unwrap();
        assert_eq!((img.width, img.height), (4, 3));
        // Pixel (1, 2) = (7, 10, 90)
        let idx = (2 * 4 + 1) * 3;
        assert_eq!(&img.pixels[idx..idx + 3], &[7, 10, 90]);
    }

    #[test]
    fn test_decode_webp() {
        let img = RgbImage::from_pixel(6, 6, image::Rgb([10, 20, 30]));
        let mut out = Vec::new();
        image::codecs::webp::WebPEncoder::new_lossless(&mut out)
            .write_image(img.as_raw(), 6, 6, image::ExtendedColorType::Rgb8)
            .unwrap();

        let decoded = decode_image(&out, None).unwrap();
        assert_eq!((decoded.width, decoded.height), (6, 6));
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03], None);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[], None).is_err());
        assert!(decode_image(&[], Some("image/jpeg")).is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let bytes = encode_with(ImageFormat::Jpeg, 32, 32);
        let result = decode_image(&bytes[..20], Some("image/jpeg"));
        assert!(result.is_err());
    }

    #[test]
    fn test_hint_used_when_sniffing_fails() {
        // Garbage with a hint reaches the decoder instead of failing early
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03], Some("image/png"));
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        let bytes = encode_with(ImageFormat::Jpeg, 8, 8);
        assert_eq!(get_orientation(&bytes), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(2, 1));
        let rotated = apply_orientation(img, Orientation::Rotate90CW).into_rgb8();
        assert_eq!(rotated.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let pixels = vec![255, 0, 0, 0, 255, 0];
        let img = DynamicImage::ImageRgb8(RgbImage::from_raw(2, 1, pixels).unwrap());

        let flipped = apply_orientation(img, Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
