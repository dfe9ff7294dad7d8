//! JPEG-2000 family signature-box brand dispatch (§4.4 12-byte tier).
//! Called with the tokenizer positioned at the start of the 12-byte
//! signature box.

use crate::catalogue::DetectionResult;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

/// Called with the tokenizer positioned right after the 12-byte JP2
/// signature box. Skips the file-type box's length + `ftyp` fields (8
/// bytes), reads the 4-ascii brand, and dispatches to the matching
/// JPEG-2000 family member.
pub fn detect(tokenizer: &mut Tokenizer) -> Result<Option<DetectionResult>> {
    tokenizer.skip(8)?;
    let brand = tokenizer.read_exact(4)?;

    let result = match &brand[..] {
        b"jp2 " => ("jp2", "image/jp2"),
        b"jpx " => ("jpx", "image/jpx"),
        b"jpm " => ("jpm", "image/jpm"),
        b"mjp2" => ("mj2", "image/mj2"),
        _ => return Ok(None),
    };
    Ok(Some(DetectionResult::new(result.0, result.1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(brand: &[u8; 4]) -> Vec<u8> {
        let mut bytes = vec![0u8; 8];
        bytes.extend_from_slice(brand);
        bytes
    }

    #[test]
    fn jp2_brand() {
        let mut t = Tokenizer::from_bytes(sample(b"jp2 "));
        assert_eq!(detect(&mut t).unwrap().unwrap().ext, "jp2");
    }

    #[test]
    fn unknown_brand_defers() {
        let mut t = Tokenizer::from_bytes(sample(b"xxxx"));
        assert!(detect(&mut t).unwrap().is_none());
    }
}
