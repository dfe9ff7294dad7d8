//! The confident detector: the ordered signature battery, escalating its
//! sample size in steps (32 → 256 → 512 bytes) so a short source is never
//! read further than it needs to be. Registered under the built-in id
//! `"core"` (see [`crate::detector::CORE_ID`]).

mod extended;
mod short;

use crate::catalogue::DetectionResult;
use crate::config::DetectionConfig;
use crate::detector::{Detector, CORE_ID};
use crate::error::Result;
use crate::tokenizer::Tokenizer;

const FIRST_TIER_SIZE: usize = 32;
const SECOND_TIER_SIZE: usize = 256;
const THIRD_TIER_SIZE: usize = 512;

/// Run the full ordered battery against `tokenizer`, starting at its
/// current position. Leaves `position` unchanged on a non-match; arms that
/// recurse (BOM strip, ID3 skip, gzip descent) are responsible for their
/// own position bookkeeping per the pipeline's "unknown" contract (§4.8).
pub fn detect(tokenizer: &mut Tokenizer, config: &DetectionConfig) -> Result<Option<DetectionResult>> {
    let sample = tokenizer.peek(FIRST_TIER_SIZE)?;
    log::trace!("confident: trying {}-byte tier", FIRST_TIER_SIZE);
    if let Some(result) = short::detect(tokenizer, &sample, config)? {
        log::debug!("confident: matched {result} in the short-tier battery");
        return Ok(Some(result));
    }

    let sample = tokenizer.peek(SECOND_TIER_SIZE)?;
    log::trace!("confident: trying {}-byte tier", SECOND_TIER_SIZE);
    if let Some(result) = extended::detect_256(&sample) {
        log::debug!("confident: matched {result} in the 256-byte tier");
        return Ok(Some(result));
    }

    let sample = tokenizer.peek(THIRD_TIER_SIZE)?;
    log::trace!("confident: trying {}-byte tier", THIRD_TIER_SIZE);
    if let Some(result) = extended::detect_512(&sample) {
        log::debug!("confident: matched {result} in the 512-byte tier");
        return Ok(Some(result));
    }

    Ok(None)
}

/// Adapts [`detect`] to the [`Detector`] trait so it can sit in a
/// [`crate::pipeline::Pipeline`]'s detector list alongside user-supplied
/// detectors.
pub struct ConfidentDetector<'a> {
    config: &'a DetectionConfig,
}

impl<'a> ConfidentDetector<'a> {
    pub fn new(config: &'a DetectionConfig) -> Self {
        Self { config }
    }
}

impl Detector for ConfidentDetector<'_> {
    fn id(&self) -> &str {
        CORE_ID
    }

    fn detect(
        &self,
        tokenizer: &mut Tokenizer,
        _prior: Option<DetectionResult>,
    ) -> Result<Option<DetectionResult>> {
        detect(tokenizer, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bytes: &[u8]) -> Option<DetectionResult> {
        let config = DetectionConfig::default();
        let mut t = Tokenizer::from_bytes(bytes.to_vec());
        detect(&mut t, &config).unwrap()
    }

    #[test]
    fn bmp_signature() {
        assert_eq!(run(&[0x42, 0x4D, 0, 0]).unwrap().ext, "bmp");
    }

    #[test]
    fn generic_jpeg() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(run(&bytes).unwrap().ext, "jpg");
    }

    #[test]
    fn empty_input_is_unknown() {
        assert!(run(&[]).is_none());
    }

    #[test]
    fn unrecognized_short_input_is_unknown() {
        assert!(run(b"not a recognized format").is_none());
    }

    #[test]
    fn position_is_unchanged_on_non_match() {
        let config = DetectionConfig::default();
        let mut t = Tokenizer::from_bytes(b"definitely not catalogued".to_vec());
        let before = t.position();
        detect(&mut t, &config).unwrap();
        assert_eq!(t.position(), before);
    }
}
