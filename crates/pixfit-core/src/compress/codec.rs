use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::{encode_image, EncodeError};
use crate::format::OutputFormat;

/// The decode and encode primitives the size search is built on.
///
/// The search only relies on these being deterministic: the same input must
/// produce the same output, so a rerun yields byte-identical results.
pub trait RasterCodec {
    /// Decode encoded bytes into an RGB raster.
    fn decode(&self, bytes: &[u8], mime_hint: Option<&str>) -> Result<DecodedImage, DecodeError>;

    /// Encode a raster. `quality` is a fraction in (0, 1]; codecs that are not
    /// quality-parameterized for `format` ignore it.
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError>;
}

impl<C: RasterCodec + ?Sized> RasterCodec for &C {
    fn decode(&self, bytes: &[u8], mime_hint: Option<&str>) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes, mime_hint)
    }

    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image, format, quality)
    }
}

/// Codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl RasterCodec for ImageCodec {
    fn decode(&self, bytes: &[u8], mime_hint: Option<&str>) -> Result<DecodedImage, DecodeError> {
        decode_image(bytes, mime_hint)
    }

    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        encode_image(image, format, quality)
    }
}
