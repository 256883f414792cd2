//! The size-targeting search as an explicit step machine.
//!
//! Each call to [`SizeSearch::step`] performs exactly one attempt: render the
//! working source at the current scale, encode it at the current quality,
//! keep the candidate if it is the smallest so far, then decide whether to
//! stop or how to adjust. Hosts that must stay responsive yield between
//! steps; hosts that don't just loop.
//!
//! Parameter adjustment has two regimes. While the best candidate is more
//! than `overshoot_ratio` times the target, the scale is multiplied by
//! `scale_factor`; once within that band, quality is lowered by
//! `quality_step`. Neither parameter ever increases within a run.

use super::{CompressError, CompressionResult, CompressionTarget, Progress, RasterCodec};
use crate::decode::{clamp_to_width, render_scaled, DecodedImage};
use crate::format::OutputFormat;

/// Slack for float drift when comparing quality against the floor.
const QUALITY_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone)]
struct Candidate {
    bytes: Vec<u8>,
    format: OutputFormat,
    quality: f32,
    scale: f32,
    width: u32,
    height: u32,
}

/// Mutable state of one run. Never shared between runs.
#[derive(Debug, Clone)]
pub struct SearchState {
    quality: f32,
    scale: f32,
    attempts: u32,
    best: Option<Candidate>,
    finished: bool,
    /// Format in use; becomes JPEG after a fallback.
    encoding: OutputFormat,
}

impl SearchState {
    fn new(target: &CompressionTarget) -> Self {
        Self {
            quality: target.policy.initial_quality,
            scale: 1.0,
            attempts: 0,
            best: None,
            finished: false,
            encoding: target.format,
        }
    }

    /// Quality the next attempt will use.
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Scale the next attempt will use.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn best_size(&self) -> Option<u64> {
        self.best.as_ref().map(|c| c.bytes.len() as u64)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn encoding(&self) -> OutputFormat {
        self.encoding
    }
}

/// One in-flight compression run.
pub struct SizeSearch<C> {
    codec: C,
    source: DecodedImage,
    target: CompressionTarget,
    state: SearchState,
}

impl<C: RasterCodec> SizeSearch<C> {
    /// Validate the target, decode the source once and prepare the run.
    ///
    /// Fails with [`CompressError::Decode`] before any attempt if the bytes
    /// are not an image.
    pub fn new(
        codec: C,
        bytes: &[u8],
        mime_hint: Option<&str>,
        target: CompressionTarget,
    ) -> Result<Self, CompressError> {
        target.validate()?;
        let source = codec.decode(bytes, mime_hint)?;
        Self::from_decoded(codec, source, target)
    }

    /// Prepare a run over an already-decoded raster.
    pub fn from_decoded(
        codec: C,
        source: DecodedImage,
        target: CompressionTarget,
    ) -> Result<Self, CompressError> {
        target.validate()?;
        if source.is_empty() {
            return Err(CompressError::Decode(
                crate::decode::DecodeError::EmptyImage {
                    width: source.width,
                    height: source.height,
                },
            ));
        }

        let source = match target.policy.max_working_width {
            Some(max_width) if source.width > max_width => {
                let clamped = clamp_to_width(&source, max_width, target.policy.filter)
                    .map_err(CompressError::Render)?;
                log::debug!(
                    "clamped working source from {}x{} to {}x{}",
                    source.width,
                    source.height,
                    clamped.width,
                    clamped.height
                );
                clamped
            }
            _ => source,
        };

        let state = SearchState::new(&target);
        Ok(Self {
            codec,
            source,
            target,
            state,
        })
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn target(&self) -> &CompressionTarget {
        &self.target
    }

    /// Dimensions of the source after the working-width clamp.
    pub fn working_dimensions(&self) -> (u32, u32) {
        (self.source.width, self.source.height)
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Run one attempt.
    ///
    /// Returns `Ok(None)` once the run has finished; the last attempt's
    /// progress has `finished` set.
    pub fn step(&mut self) -> Result<Option<Progress>, CompressError> {
        if self.state.finished {
            return Ok(None);
        }

        let policy = &self.target.policy;
        let quality = self.state.quality;
        let scale = self.state.scale;

        let rendered =
            render_scaled(&self.source, scale, policy.filter).map_err(CompressError::Render)?;
        let bytes = self.encode(&rendered, quality)?;
        let candidate_size = bytes.len() as u64;
        self.state.attempts += 1;

        let improved = self
            .state
            .best
            .as_ref()
            .map_or(true, |best| bytes.len() < best.bytes.len());
        if improved {
            self.state.best = Some(Candidate {
                bytes,
                format: self.state.encoding,
                quality,
                scale,
                width: rendered.width,
                height: rendered.height,
            });
        }
        let best_size = self.state.best_size().unwrap_or(candidate_size);

        let policy = &self.target.policy;
        let target_bytes = self.target.target_bytes;
        let met = best_size <= target_bytes;
        let exhausted = self.state.attempts >= policy.max_attempts;
        let at_floor = quality <= policy.min_quality + QUALITY_EPSILON;
        self.state.finished = met || exhausted || at_floor;

        log::debug!(
            "attempt {}: q={:.2} scale={:.3} {}x{} -> {} bytes (best {}, target {})",
            self.state.attempts,
            quality,
            scale,
            rendered.width,
            rendered.height,
            candidate_size,
            best_size,
            target_bytes
        );

        if !self.state.finished {
            if best_size as f64 > f64::from(policy.overshoot_ratio) * target_bytes as f64 {
                self.state.scale = scale * policy.scale_factor;
            } else {
                self.state.quality = (quality - policy.quality_step).max(policy.min_quality);
            }
        }

        Ok(Some(Progress {
            attempt: self.state.attempts,
            quality,
            scale,
            width: rendered.width,
            height: rendered.height,
            candidate_size,
            best_size,
            target_bytes,
            format: self.state.encoding,
            finished: self.state.finished,
        }))
    }

    /// Encode in the current format, switching the run to JPEG for good if
    /// the encoder rejects anything else.
    fn encode(&mut self, image: &DecodedImage, quality: f32) -> Result<Vec<u8>, CompressError> {
        match self.codec.encode(image, self.state.encoding, quality) {
            Ok(bytes) => Ok(bytes),
            Err(err) if self.state.encoding != OutputFormat::Jpeg => {
                log::warn!(
                    "encoding {} failed ({}), falling back to {}",
                    self.state.encoding,
                    err,
                    OutputFormat::Jpeg
                );
                self.state.encoding = OutputFormat::Jpeg;
                Ok(self.codec.encode(image, OutputFormat::Jpeg, quality)?)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Package the smallest candidate observed.
    ///
    /// Can be called early to stop a run; `None` only if no attempt was made.
    pub fn into_result(self) -> Option<CompressionResult> {
        let attempts = self.state.attempts;
        let target_bytes = self.target.target_bytes;
        let requested_format = self.target.format;

        self.state.best.map(|best| {
            let met_target = best.bytes.len() as u64 <= target_bytes;
            log::info!(
                "compressed to {} bytes in {} attempts (target {}, met: {})",
                best.bytes.len(),
                attempts,
                target_bytes,
                met_target
            );
            CompressionResult {
                bytes: best.bytes,
                quality: best.quality,
                scale: best.scale,
                width: best.width,
                height: best.height,
                attempts,
                target_bytes,
                met_target,
                format: best.format,
                requested_format,
            }
        })
    }
}
