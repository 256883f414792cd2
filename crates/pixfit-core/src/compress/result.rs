use serde::Serialize;

use crate::format::{output_file_name, OutputFormat};

/// Snapshot reported after every attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// 1-based attempt index.
    pub attempt: u32,
    pub quality: f32,
    pub scale: f32,
    /// Pixel size of this attempt's render.
    pub width: u32,
    pub height: u32,
    pub candidate_size: u64,
    /// Smallest candidate so far, including this one.
    pub best_size: u64,
    pub target_bytes: u64,
    /// Format this attempt was actually encoded in.
    pub format: OutputFormat,
    /// Whether this was the last attempt of the run.
    pub finished: bool,
}

impl Progress {
    /// Share of the way to the target, for progress bars.
    ///
    /// `target / best * 100`, capped at 100. Purely cosmetic.
    pub fn percent(&self) -> f64 {
        if self.best_size == 0 {
            return 100.0;
        }
        (self.target_bytes as f64 / self.best_size as f64 * 100.0).min(100.0)
    }
}

/// Receives a [`Progress`] after each attempt.
///
/// Reporting is fire-and-forget; a sink cannot influence the search.
pub trait ProgressSink {
    fn report(&mut self, progress: &Progress);
}

impl<F: FnMut(&Progress)> ProgressSink for F {
    fn report(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Sink that drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _progress: &Progress) {}
}

/// Outcome of one compression run: the smallest candidate it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub bytes: Vec<u8>,
    /// Quality the returned candidate was encoded at.
    pub quality: f32,
    /// Scale the returned candidate was rendered at, relative to the
    /// working (width-clamped) source.
    pub scale: f32,
    pub width: u32,
    pub height: u32,
    /// Attempts the run used, not the index of the returned candidate.
    pub attempts: u32,
    pub target_bytes: u64,
    /// `false` when the run ended by exhausting attempts or hitting the
    /// quality floor with every candidate over budget.
    pub met_target: bool,
    /// Format actually produced.
    pub format: OutputFormat,
    /// Format the caller asked for.
    pub requested_format: OutputFormat,
}

impl CompressionResult {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the encoder rejected the requested format and JPEG was
    /// produced instead.
    pub fn format_fallback(&self) -> bool {
        self.format != self.requested_format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Name for the output file, derived from the source's name.
    pub fn file_name(&self, original_name: &str) -> String {
        output_file_name(original_name, self.format)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
