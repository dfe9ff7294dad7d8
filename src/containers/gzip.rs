//! Transparent gzip→nested-detection descent (§4.4 3-byte tier). Spawns an
//! inflate stream over the remainder of the source and asks the caller to
//! run a full nested detection against it; `tar` inside promotes the
//! result to `tar.gz`, anything else falls back to plain `gz`.

use flate2::read::GzDecoder;

use crate::catalogue::DetectionResult;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

/// `nested_detect` is the confident+imprecise pipeline's own entry point,
/// passed in by the caller to avoid a dependency cycle between this module
/// and `src/confident`.
pub fn detect(
    tokenizer: &mut Tokenizer,
    mut nested_detect: impl FnMut(&mut Tokenizer) -> Result<Option<DetectionResult>>,
) -> Result<Option<DetectionResult>> {
    let rest = std::mem::replace(tokenizer, Tokenizer::from_bytes(Vec::new()));
    let decoder = GzDecoder::new(rest);
    let mut inner = Tokenizer::new(decoder);

    let inner_result = nested_detect(&mut inner)?;
    let result = match inner_result {
        Some(r) if r.ext == "tar" => DetectionResult::new("tar.gz", "application/gzip"),
        _ => DetectionResult::new("gz", "application/gzip"),
    };
    Ok(Some(result))
}
