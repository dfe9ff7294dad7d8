//! The imprecise detector (§4.7): ambiguous short signatures and the MPEG
//! audio frame sync scan. Runs only after the confident battery returns
//! "unknown" without advancing the tokenizer.

use crate::catalogue::DetectionResult;
use crate::config::DetectionConfig;
use crate::detector::{Detector, CORE_IMPRECISE_ID};
use crate::error::Result;
use crate::pattern::check;
use crate::tokenizer::Tokenizer;

pub fn detect(tokenizer: &mut Tokenizer, config: &DetectionConfig) -> Result<Option<DetectionResult>> {
    let head = tokenizer.peek(8)?;

    if check(&head, &[0x00, 0x00, 0x01, 0xBA], 0, None)
        || check(&head, &[0x00, 0x00, 0x01, 0xB3], 0, None)
    {
        log::debug!("imprecise: matched raw MPEG-PS");
        return Ok(Some(DetectionResult::new("mpg", "video/mpeg")));
    }
    if check(&head, &[0x00, 0x01, 0x00, 0x00, 0x00], 0, None) {
        log::debug!("imprecise: matched bare TTF");
        return Ok(Some(DetectionResult::new("ttf", "font/ttf")));
    }
    if check(&head, &[0x00, 0x00, 0x01, 0x00], 0, None) {
        log::debug!("imprecise: matched bare ICO");
        return Ok(Some(DetectionResult::new("ico", "image/x-icon")));
    }
    if check(&head, &[0x00, 0x00, 0x02, 0x00], 0, None) {
        log::debug!("imprecise: matched bare CUR");
        return Ok(Some(DetectionResult::new("cur", "image/x-icon")));
    }

    let scan_len = 2 + config.mpeg_offset_tolerance as usize;
    let window = tokenizer.peek(scan_len)?;
    for depth in 0..=config.mpeg_offset_tolerance as usize {
        let Some(&first) = window.get(depth) else { break };
        let Some(&second) = window.get(depth + 1) else { break };
        if first != 0xFF || (second & 0xE0) != 0xE0 {
            continue;
        }
        if (second & 0x16) == 0x10 {
            log::debug!("imprecise: matched ADTS sync at depth {depth}");
            return Ok(Some(DetectionResult::new("aac", "audio/aac")));
        }
        if (second & 0x06) == 0x02 {
            log::debug!("imprecise: matched MPEG layer 3 sync at depth {depth}");
            return Ok(Some(DetectionResult::new("mp3", "audio/mpeg")));
        }
        if (second & 0x06) == 0x04 {
            log::debug!("imprecise: matched MPEG layer 2 sync at depth {depth}");
            return Ok(Some(DetectionResult::new("mp2", "audio/mpeg")));
        }
        if (second & 0x06) == 0x06 {
            log::debug!("imprecise: matched MPEG layer 1 sync at depth {depth}");
            return Ok(Some(DetectionResult::new("mp1", "audio/mpeg")));
        }
    }

    Ok(None)
}

/// Adapts [`detect`] to the [`Detector`] trait for [`crate::pipeline::Pipeline`].
pub struct ImpreciseDetector<'a> {
    config: &'a DetectionConfig,
}

impl<'a> ImpreciseDetector<'a> {
    pub fn new(config: &'a DetectionConfig) -> Self {
        Self { config }
    }
}

impl Detector for ImpreciseDetector<'_> {
    fn id(&self) -> &str {
        CORE_IMPRECISE_ID
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

    #[test]
    fn mpeg_ps_detected() {
        let config = DetectionConfig::default();
        let mut t = Tokenizer::from_bytes(vec![0x00, 0x00, 0x01, 0xBA, 0, 0, 0, 0]);
        assert_eq!(detect(&mut t, &config).unwrap().unwrap().ext, "mpg");
    }

    #[test]
    fn bare_ttf_detected() {
        let config = DetectionConfig::default();
        let mut t = Tokenizer::from_bytes(vec![0x00, 0x01, 0x00, 0x00, 0x00, 0, 0, 0]);
        assert_eq!(detect(&mut t, &config).unwrap().unwrap().ext, "ttf");
    }

    #[test]
    fn mp3_sync_at_offset_zero() {
        let config = DetectionConfig::default();
        let mut t = Tokenizer::from_bytes(vec![0xFF, 0xFB, 0x90, 0, 0, 0, 0, 0]);
        assert_eq!(detect(&mut t, &config).unwrap().unwrap().ext, "mp3");
    }

    #[test]
    fn sync_past_default_tolerance_is_unknown() {
        let config = DetectionConfig::default();
        let mut t = Tokenizer::from_bytes(vec![0, 0, 0, 0, 0, 0, 0xFF, 0xFB]);
        assert!(detect(&mut t, &config).unwrap().is_none());
    }

    #[test]
    fn sync_found_with_sufficient_tolerance() {
        let config = DetectionConfig::new().with_mpeg_offset_tolerance(10);
        let mut t = Tokenizer::from_bytes(vec![0u8; 10].into_iter().chain([0xFF, 0xFB]).collect());
        assert_eq!(detect(&mut t, &config).unwrap().unwrap().ext, "mp3");
    }
}
