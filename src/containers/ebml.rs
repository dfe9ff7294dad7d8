//! EBML (Matroska/WebM) variable-length integer decode and DocType
//! extraction (§4.5). Called with the tokenizer positioned right after the
//! `1A 45 DF A3` EBML signature.

use crate::catalogue::DetectionResult;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

const DOCTYPE_ELEMENT_ID: u64 = 0x4282;

/// Decode an EBML variable-length integer: the position of the leading
/// 1-bit in the first byte gives the total width (1..=8 bytes); the length
/// value has that leading bit cleared.
fn read_vint(tokenizer: &mut Tokenizer) -> Result<Option<(u64, usize)>> {
    let first = tokenizer.read_exact(1)?[0];
    if first == 0 {
        return Ok(None);
    }
    let width = first.leading_zeros() as usize + 1;
    if width > 8 {
        return Ok(None);
    }
    let mut value = (first & (0xFFu8 >> width)) as u64;
    if width > 1 {
        let rest = tokenizer.read_exact(width - 1)?;
        for byte in rest {
            value = (value << 8) | byte as u64;
        }
    }
    Ok(Some((value, width)))
}

/// Read the root element's size (the caller has already consumed the 4-byte
/// EBML signature that serves as its id), then scan its children up to
/// `len` bytes for the DocType element, decoding it as UTF-8 and trimming a
/// trailing NUL. Maps `webm` → webm, `matroska` → mkv, anything else →
/// "unknown" (a malformed or unrecognized EBML doc is still EBML, but not a
/// catalogued one).
pub fn detect(tokenizer: &mut Tokenizer) -> Result<Option<DetectionResult>> {
    let (root_len, _) = match read_vint(tokenizer)? {
        Some(v) => v,
        None => return Ok(None),
    };

    let mut remaining = root_len;
    while remaining > 0 {
        let before = tokenizer.position();
        let (id, id_width) = match read_vint(tokenizer)? {
            Some(v) => v,
            None => break,
        };
        let (len, len_width) = match read_vint(tokenizer)? {
            Some(v) => v,
            None => break,
        };
        let consumed_header = (id_width + len_width) as u64;
        if consumed_header > remaining {
            break;
        }

        if id == DOCTYPE_ELEMENT_ID {
            let bytes = tokenizer.read_exact(len as usize)?;
            let doctype = String::from_utf8_lossy(&bytes);
            let doctype = doctype.trim_end_matches('\u{0}');
            return Ok(match doctype {
                "webm" => Some(DetectionResult::new("webm", "video/webm")),
                "matroska" => Some(DetectionResult::new("mkv", "video/x-matroska")),
                _ => None,
            });
        }

        tokenizer.skip(len)?;
        remaining = remaining.saturating_sub(consumed_header + len);
        let _ = before;
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vint(value: u64, width: usize) -> Vec<u8> {
        let marker = 1u8 << (8 - width);
        let mut bytes = vec![0u8; width];
        bytes[0] = marker;
        for i in 0..width {
            let shift = 8 * (width - 1 - i);
            bytes[i] |= ((value >> shift) & 0xFF) as u8;
        }
        bytes
    }

    fn doctype_element(doctype: &str) -> Vec<u8> {
        let mut out = vint(DOCTYPE_ELEMENT_ID, 2);
        out.extend(vint(doctype.len() as u64, 1));
        out.extend(doctype.as_bytes());
        out
    }

    #[test]
    fn decodes_webm_doctype() {
        let children = doctype_element("webm");
        let mut body = vint(children.len() as u64, 1);
        body.extend(children);
        let mut t = Tokenizer::from_bytes(body);
        assert_eq!(detect(&mut t).unwrap().unwrap().ext, "webm");
    }

    #[test]
    fn decodes_matroska_doctype() {
        let children = doctype_element("matroska");
        let mut body = vint(children.len() as u64, 1);
        body.extend(children);
        let mut t = Tokenizer::from_bytes(body);
        assert_eq!(detect(&mut t).unwrap().unwrap().ext, "mkv");
    }

    #[test]
    fn unrecognized_doctype_is_unknown() {
        let children = doctype_element("nonstandard");
        let mut body = vint(children.len() as u64, 1);
        body.extend(children);
        let mut t = Tokenizer::from_bytes(body);
        assert!(detect(&mut t).unwrap().is_none());
    }
}
