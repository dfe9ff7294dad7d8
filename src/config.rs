//! Runtime configuration for a [`crate::pipeline::Pipeline`].
//!
//! Plays the same role `Body::new`/`Body::new_from` play in `exhume_body`:
//! a small, plain struct callers build once and pass down, rather than a
//! constellation of loose arguments threaded through every call.

use crate::detector::Detector;
use crate::tokenizer::CancellationToken;

/// Tuning knobs for a detection run.
pub struct DetectionConfig {
    /// How many bytes an ADTS/MPEG-audio sync scan may skip past a
    /// malformed or padded leading frame before giving up. `0` requires the
    /// sync word at the very start of the sample.
    pub mpeg_offset_tolerance: u8,

    /// Detectors to try before the built-in `"core"` battery runs, in
    /// order. A custom detector that returns `Some` wins outright; the
    /// built-in batteries never overrule it.
    pub custom_detectors: Vec<Box<dyn Detector>>,

    /// Upper bound, in bytes, on how much of the source the confident
    /// battery will read while escalating through its signature tiers.
    pub sample_size: usize,

    /// Cooperative cancellation signal shared with the [`crate::tokenizer::Tokenizer`].
    pub cancellation: CancellationToken,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            mpeg_offset_tolerance: 0,
            custom_detectors: Vec::new(),
            sample_size: 4100,
            cancellation: CancellationToken::new(),
        }
    }
}

impl DetectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mpeg_offset_tolerance(mut self, tolerance: u8) -> Self {
        self.mpeg_offset_tolerance = tolerance;
        self
    }

    pub fn with_custom_detector(mut self, detector: Box<dyn Detector>) -> Self {
        self.custom_detectors.push(detector);
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }
}
