//! PNG chunk walk (§4.4 8-byte tier / §4.5). Called with the tokenizer
//! positioned right after the 8-byte PNG signature.

use crate::catalogue::DetectionResult;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

/// Walk `(length: u32-be, type: 4-ascii, data, crc)` chunks until an `acTL`
/// chunk (animated PNG) or an `IDAT` chunk (still image) is found. A
/// negative-looking length (the top bit of the u32 set) is malformed input
/// per §7 and yields "unknown" rather than a hard error.
pub fn detect(tokenizer: &mut Tokenizer) -> Result<Option<DetectionResult>> {
    loop {
        let length_bytes = match tokenizer.read(4) {
            Ok(bytes) if bytes.len() == 4 => bytes,
            _ => return Ok(None),
        };
        let length = u32::from_be_bytes(length_bytes.try_into().unwrap());
        if length & 0x8000_0000 != 0 {
            return Ok(None);
        }

        let chunk_type = match tokenizer.read(4) {
            Ok(bytes) if bytes.len() == 4 => bytes,
            _ => return Ok(None),
        };

        match &chunk_type[..] {
            b"acTL" => return Ok(Some(DetectionResult::new("apng", "image/apng"))),
            b"IDAT" => return Ok(Some(DetectionResult::new("png", "image/png"))),
            _ => {}
        }

        if tokenizer.skip(length as u64 + 4).is_err() {
            return Ok(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(kind: &[u8; 4], data_len: usize) -> Vec<u8> {
        let mut bytes = (data_len as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(kind);
        bytes.extend(vec![0u8; data_len]);
        bytes.extend(vec![0u8; 4]); // crc
        bytes
    }

    #[test]
    fn actl_before_idat_is_apng() {
        let mut sample = chunk(b"IHDR", 13);
        sample.extend(chunk(b"acTL", 8));
        sample.extend(chunk(b"IDAT", 0));
        let mut t = Tokenizer::from_bytes(sample);
        assert_eq!(detect(&mut t).unwrap().unwrap().ext, "apng");
    }

    #[test]
    fn idat_without_actl_is_png() {
        let mut sample = chunk(b"IHDR", 13);
        sample.extend(chunk(b"IDAT", 0));
        let mut t = Tokenizer::from_bytes(sample);
        assert_eq!(detect(&mut t).unwrap().unwrap().ext, "png");
    }

    #[test]
    fn negative_length_is_unknown() {
        let mut sample = vec![0x80, 0x00, 0x00, 0x00];
        sample.extend_from_slice(b"IDAT");
        let mut t = Tokenizer::from_bytes(sample);
        assert!(detect(&mut t).unwrap().is_none());
    }
}
