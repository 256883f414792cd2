//! Deterministic codec double whose output size follows a simple model.
//!
//! Encoded size is `round(width * height * quality)` bytes for JPEG and
//! `width * height` bytes for the lossless formats. With `inverted` set,
//! lowering JPEG quality grows the output instead, mimicking encoders that
//! misbehave on pathological inputs.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::RasterCodec;
use crate::decode::{DecodeError, DecodedImage};
use crate::encode::EncodeError;
use crate::format::OutputFormat;

const MAGIC: &[u8; 4] = b"SZMD";

#[derive(Debug, Default)]
pub(crate) struct SizeModelCodec {
    rejected: Option<OutputFormat>,
    inverted: bool,
    decodes: Cell<u32>,
    encodes: RefCell<HashMap<OutputFormat, u32>>,
}

impl SizeModelCodec {
    pub(crate) fn rejecting(format: OutputFormat) -> Self {
        Self {
            rejected: Some(format),
            ..Self::default()
        }
    }

    pub(crate) fn inverted() -> Self {
        Self {
            inverted: true,
            ..Self::default()
        }
    }

    /// Source bytes this codec decodes to a `width x height` raster.
    pub(crate) fn source_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes
    }

    pub(crate) fn calls(&self, format: OutputFormat) -> u32 {
        self.encodes.borrow().get(&format).copied().unwrap_or(0)
    }

    pub(crate) fn decode_calls(&self) -> u32 {
        self.decodes.get()
    }
}

impl RasterCodec for SizeModelCodec {
    fn decode(&self, bytes: &[u8], _mime_hint: Option<&str>) -> Result<DecodedImage, DecodeError> {
        self.decodes.set(self.decodes.get() + 1);
        if bytes.len() != 12 || &bytes[..4] != MAGIC {
            return Err(DecodeError::InvalidFormat);
        }
        let width = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let height = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        Ok(DecodedImage::new(
            width,
            height,
            vec![0u8; (width as usize) * (height as usize) * 3],
        ))
    }

    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        *self.encodes.borrow_mut().entry(format).or_insert(0) += 1;
        if self.rejected == Some(format) {
            return Err(EncodeError::UnsupportedFormat(format));
        }

        let pixels = image.pixel_count() as f64;
        let size = match format {
            OutputFormat::Jpeg if self.inverted => pixels * (2.0 - f64::from(quality)),
            OutputFormat::Jpeg => pixels * f64::from(quality),
            OutputFormat::Png | OutputFormat::Webp => pixels,
        };
        Ok(vec![0u8; (size.round() as usize).max(1)])
    }
}
