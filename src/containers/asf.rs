//! ASF (Advanced Systems Format) GUID walk (§4.5). Called with the
//! tokenizer positioned right after the 16-byte ASF header GUID.

use crate::catalogue::DetectionResult;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

const STREAM_PROPERTIES_GUID: [u8; 16] = [
    0x91, 0x07, 0xDC, 0xB7, 0xB7, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];

const AUDIO_MEDIA_GUID: [u8; 16] = [
    0x40, 0x9E, 0x69, 0xF8, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
];

const VIDEO_MEDIA_GUID: [u8; 16] = [
    0xC0, 0xEF, 0x19, 0xBC, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
];

/// Skip 30 bytes of file-properties header, then iterate `(guid: 16,
/// size: u64-le)` top-level objects within roughly the first kilobyte
/// looking for a Stream-Properties-Object, whose embedded type GUID
/// distinguishes audio from video. Defaults to a generic ASF result.
pub fn detect(tokenizer: &mut Tokenizer) -> Result<Option<DetectionResult>> {
    tokenizer.skip(30)?;

    let mut scanned: u64 = 0;
    while scanned < 1024 {
        let guid = match tokenizer.read(16) {
            Ok(bytes) if bytes.len() == 16 => bytes,
            _ => break,
        };
        let size_bytes = match tokenizer.read(8) {
            Ok(bytes) if bytes.len() == 8 => bytes,
            _ => break,
        };
        let size = u64::from_le_bytes(size_bytes.try_into().unwrap());
        scanned += 24;

        if guid == STREAM_PROPERTIES_GUID {
            let type_guid = tokenizer.read(16)?;
            if type_guid.as_slice() == AUDIO_MEDIA_GUID {
                return Ok(Some(DetectionResult::new("wma", "audio/x-ms-wma")));
            }
            if type_guid.as_slice() == VIDEO_MEDIA_GUID {
                return Ok(Some(DetectionResult::new("wmv", "video/x-ms-wmv")));
            }
            return Ok(Some(DetectionResult::new("asf", "video/x-ms-asf")));
        }

        let body_remaining = size.saturating_sub(24);
        if tokenizer.skip(body_remaining).is_err() {
            break;
        }
        scanned += body_remaining;
    }

    Ok(Some(DetectionResult::new("asf", "video/x-ms-asf")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(guid: [u8; 16], body: &[u8]) -> Vec<u8> {
        let mut bytes = guid.to_vec();
        bytes.extend(((24 + body.len()) as u64).to_le_bytes());
        bytes.extend(body);
        bytes
    }

    #[test]
    fn audio_stream_properties_detected() {
        let mut body = vec![0u8; 30];
        let mut type_guid_body = AUDIO_MEDIA_GUID.to_vec();
        type_guid_body.extend(vec![0u8; 16]); // padding so the object has a body
        body.extend(object(STREAM_PROPERTIES_GUID, &type_guid_body));
        let mut t = Tokenizer::from_bytes(body);
        assert_eq!(detect(&mut t).unwrap().unwrap().ext, "wma");
    }

    #[test]
    fn defaults_to_generic_asf() {
        let mut body = vec![0u8; 30];
        body.extend(object([0u8; 16], &[0u8; 8]));
        let mut t = Tokenizer::from_bytes(body);
        assert_eq!(detect(&mut t).unwrap().unwrap().ext, "asf");
    }
}
