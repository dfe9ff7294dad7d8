//! The detection pipeline (§4.8): runs user-supplied detectors, then the
//! built-in confident battery, then the built-in imprecise battery,
//! enforcing the "unknown" contract when a detector consumes bytes without
//! producing a result.

use crate::catalogue::DetectionResult;
use crate::config::DetectionConfig;
use crate::confident::{self, ConfidentDetector};
use crate::detector::Detector;
use crate::error::Result;
use crate::imprecise::{self, ImpreciseDetector};
use crate::tokenizer::Tokenizer;

/// Owns a [`DetectionConfig`] and exposes the single public entry point,
/// `detect`.
pub struct Pipeline {
    config: DetectionConfig,
}

impl Pipeline {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Snapshot the entry position, run every detector in order (custom
    /// detectors first, then `"core"`, then `"core.imprecise"`), and return
    /// the first non-empty result. If a detector consumed bytes without
    /// producing a result, the whole call resolves to "unknown" rather than
    /// trying the next detector — a detector that advances the tokenizer is
    /// claiming the input, even if it ultimately can't name it.
    pub fn detect(&self, tokenizer: &mut Tokenizer) -> Result<Option<DetectionResult>> {
        tokenizer.set_cancellation(self.config.cancellation.clone());
        let entry_position = tokenizer.position();

        for detector in &self.config.custom_detectors {
            if let Some(result) = detector.detect(tokenizer, None)? {
                log::info!("pipeline: detector {:?} matched {result}", detector.id());
                return Ok(Some(result));
            }
            if tokenizer.position() != entry_position {
                log::debug!(
                    "pipeline: detector {:?} consumed bytes without a result, reporting unknown",
                    detector.id()
                );
                return Ok(None);
            }
        }

        let confident = ConfidentDetector::new(&self.config);
        if let Some(result) = confident.detect(tokenizer, None)? {
            return Ok(Some(result));
        }
        if tokenizer.position() != entry_position {
            log::debug!("pipeline: confident battery consumed bytes without a result");
            return Ok(None);
        }

        let imprecise = ImpreciseDetector::new(&self.config);
        if let Some(result) = imprecise.detect(tokenizer, None)? {
            return Ok(Some(result));
        }
        if tokenizer.position() != entry_position {
            return Ok(None);
        }

        log::info!("pipeline: no detector matched, reporting unknown");
        Ok(None)
    }
}

/// Runs custom detectors, then `"core"`, then `"core.imprecise"` without
/// the outer position-snapshot accounting — used by the confident
/// detector's own ID3v2/gzip recursions, which want the full detector set
/// (so a custom detector sees the decompressed/unwrapped stream) but not a
/// second "unknown" contract layered on top of the one already governing
/// the outer call.
pub fn run_full_pipeline(
    tokenizer: &mut Tokenizer,
    config: &DetectionConfig,
) -> Result<Option<DetectionResult>> {
    for detector in &config.custom_detectors {
        if let Some(result) = detector.detect(tokenizer, None)? {
            return Ok(Some(result));
        }
    }
    if let Some(result) = confident::detect(tokenizer, config)? {
        return Ok(Some(result));
    }
    imprecise::detect(tokenizer, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::Detector;

    struct AlwaysMatches;
    impl Detector for AlwaysMatches {
        fn id(&self) -> &str {
            "test.always"
        }
        fn detect(
            &self,
            _tokenizer: &mut Tokenizer,
            _prior: Option<DetectionResult>,
        ) -> Result<Option<DetectionResult>> {
            Ok(Some(DetectionResult::new("png", "image/png")))
        }
    }

    struct ConsumesWithoutResult;
    impl Detector for ConsumesWithoutResult {
        fn id(&self) -> &str {
            "test.consumes"
        }
        fn detect(
            &self,
            tokenizer: &mut Tokenizer,
            _prior: Option<DetectionResult>,
        ) -> Result<Option<DetectionResult>> {
            tokenizer.skip(1)?;
            Ok(None)
        }
    }

    #[test]
    fn custom_detector_preempts_built_ins() {
        let config = DetectionConfig::new().with_custom_detector(Box::new(AlwaysMatches));
        let pipeline = Pipeline::new(config);
        let mut t = Tokenizer::from_bytes(vec![0x42, 0x4D, 0, 0]); // would be bmp otherwise
        let result = pipeline.detect(&mut t).unwrap().unwrap();
        assert_eq!(result.ext, "png");
    }

    #[test]
    fn custom_detector_consuming_without_result_halts_as_unknown() {
        let config = DetectionConfig::new().with_custom_detector(Box::new(ConsumesWithoutResult));
        let pipeline = Pipeline::new(config);
        let mut t = Tokenizer::from_bytes(vec![0x42, 0x4D, 0, 0]);
        assert!(pipeline.detect(&mut t).unwrap().is_none());
    }

    #[test]
    fn falls_through_to_confident_battery() {
        let config = DetectionConfig::default();
        let pipeline = Pipeline::new(config);
        let mut t = Tokenizer::from_bytes(vec![0x42, 0x4D, 0, 0]);
        assert_eq!(pipeline.detect(&mut t).unwrap().unwrap().ext, "bmp");
    }

    #[test]
    fn empty_input_is_unknown_not_an_error() {
        let config = DetectionConfig::default();
        let pipeline = Pipeline::new(config);
        let mut t = Tokenizer::from_bytes(vec![]);
        assert!(pipeline.detect(&mut t).unwrap().is_none());
    }

    #[test]
    fn cancellation_token_set_on_the_config_aborts_detection() {
        use crate::tokenizer::CancellationToken;

        let token = CancellationToken::new();
        token.cancel();
        let config = DetectionConfig::new().with_cancellation(token);
        let pipeline = Pipeline::new(config);
        let mut t = Tokenizer::from_bytes(vec![0x42, 0x4D, 0, 0]); // would be bmp otherwise
        assert!(matches!(
            pipeline.detect(&mut t),
            Err(crate::error::SniffError::Aborted)
        ));
    }
}
