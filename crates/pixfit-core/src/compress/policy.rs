//! Search policy constants and the per-run compression target.

use serde::{Deserialize, Serialize};

use super::CompressError;
use crate::decode::FilterType;
use crate::format::OutputFormat;

pub const DEFAULT_INITIAL_QUALITY: f32 = 0.9;
pub const DEFAULT_MIN_QUALITY: f32 = 0.05;
pub const DEFAULT_QUALITY_STEP: f32 = 0.05;
pub const DEFAULT_SCALE_FACTOR: f32 = 0.9;
pub const DEFAULT_OVERSHOOT_RATIO: f32 = 2.0;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 40;
pub const DEFAULT_MAX_WORKING_WIDTH: u32 = 2500;

/// Tunables of the size search.
///
/// Deserializes from a partial camelCase object: missing fields keep their
/// defaults, so `{ "maxAttempts": 10 }` is a valid policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionPolicy {
    /// Quality of the first attempt, in (0, 1].
    pub initial_quality: f32,
    /// The search stops once quality has been lowered to this value.
    pub min_quality: f32,
    /// Amount subtracted from quality when fine-tuning.
    pub quality_step: f32,
    /// Multiplier applied to the scale when the best candidate overshoots.
    pub scale_factor: f32,
    /// A best candidate larger than `overshoot_ratio * target` is corrected
    /// by scaling down instead of lowering quality.
    pub overshoot_ratio: f32,
    pub max_attempts: u32,
    /// Sources wider than this are shrunk once before the search starts.
    pub max_working_width: Option<u32>,
    pub filter: FilterType,
}

impl Default for CompressionPolicy {
    fn default() -> Self {
        Self {
            initial_quality: DEFAULT_INITIAL_QUALITY,
            min_quality: DEFAULT_MIN_QUALITY,
            quality_step: DEFAULT_QUALITY_STEP,
            scale_factor: DEFAULT_SCALE_FACTOR,
            overshoot_ratio: DEFAULT_OVERSHOOT_RATIO,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_working_width: Some(DEFAULT_MAX_WORKING_WIDTH),
            filter: FilterType::default(),
        }
    }
}

impl CompressionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every constant is in range.
    ///
    /// Comparisons are written so that NaN fails them.
    pub fn validate(&self) -> Result<(), CompressError> {
        let invalid = |msg: &str| Err(CompressError::InvalidPolicy(msg.to_string()));

        if !(self.initial_quality > 0.0 && self.initial_quality <= 1.0) {
            return invalid("initialQuality must be in (0, 1]");
        }
        if !(self.min_quality > 0.0 && self.min_quality <= self.initial_quality) {
            return invalid("minQuality must be in (0, initialQuality]");
        }
        if !(self.quality_step > 0.0 && self.quality_step < 1.0) {
            return invalid("qualityStep must be in (0, 1)");
        }
        if !(self.scale_factor > 0.0 && self.scale_factor < 1.0) {
            return invalid("scaleFactor must be in (0, 1)");
        }
        if !(self.overshoot_ratio >= 1.0 && self.overshoot_ratio.is_finite()) {
            return invalid("overshootRatio must be a finite value of at least 1");
        }
        if self.max_attempts == 0 {
            return invalid("maxAttempts must be at least 1");
        }
        if self.max_working_width == Some(0) {
            return invalid("maxWorkingWidth must be at least 1");
        }
        Ok(())
    }
}

/// What one compression run aims for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionTarget {
    /// Upper bound on the output size the search tries to satisfy.
    pub target_bytes: u64,
    pub format: OutputFormat,
    #[serde(default)]
    pub policy: CompressionPolicy,
}

impl CompressionTarget {
    pub fn new(target_bytes: u64, format: OutputFormat) -> Self {
        Self {
            target_bytes,
            format,
            policy: CompressionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CompressionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), CompressError> {
        if self.target_bytes == 0 {
            return Err(CompressError::InvalidTarget);
        }
        self.policy.validate()
    }
}
