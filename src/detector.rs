//! The detector seam: a named probe that inspects a tokenizer and either
//! confirms a format or defers.

use crate::catalogue::DetectionResult;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

/// Identifier of the built-in confident battery (§4.4/§4.5 of the design
/// notes): exact signatures and container probes, checked before any
/// user-supplied detector gets a second look.
pub const CORE_ID: &str = "core";

/// Identifier of the built-in imprecise battery: heuristics that can misfire
/// on crafted input (MPEG-PS, bare TTF/ICO/CUR, ADTS sync scanning).
pub const CORE_IMPRECISE_ID: &str = "core.imprecise";

/// A named probe over a byte source.
///
/// `detect` receives the tokenizer positioned at the start of the sample and
/// the best result found so far (`prior`), so a later detector in the
/// pipeline can refine or defer to an earlier one rather than racing it
/// blindly. Returning `Ok(None)` means "no opinion", not "not this format" —
/// the pipeline keeps trying the remaining detectors.
pub trait Detector {
    /// Stable identifier used in diagnostics and to locate a detector within
    /// a [`crate::config::DetectionConfig::custom_detectors`] list.
    fn id(&self) -> &str;

    fn detect(
        &self,
        tokenizer: &mut Tokenizer,
        prior: Option<DetectionResult>,
    ) -> Result<Option<DetectionResult>>;
}
