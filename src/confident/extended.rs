//! The 256-byte and 512-byte expansion tiers (§4.4). Reached only once the
//! shorter tiers have all failed to match — the sample is grown lazily so a
//! short source never pays for bytes nothing will inspect.

use crate::catalogue::DetectionResult;
use crate::containers::tar;
use crate::pattern::check;

fn r(ext: &'static str, mime: &'static str) -> Option<DetectionResult> {
    Some(DetectionResult::new(ext, mime))
}

/// `sample` is grown to (up to) 256 bytes.
pub fn detect_256(sample: &[u8]) -> Option<DetectionResult> {
    if check(sample, b"acsp", 36, None) {
        return r("icc", "application/vnd.iccprofile");
    }
    if check(sample, b"**ACE**", 7, None) || check(sample, b"**ACE**", 12, None) {
        return r("ace", "application/x-ace-compressed");
    }
    if check(sample, b"BEGIN:VCARD", 0, None) || check(sample, b"BEGIN:VCARD", 6, None) {
        return r("vcf", "text/vcard");
    }
    if check(sample, b"BEGIN:VCALENDAR", 0, None) || check(sample, b"BEGIN:VCALENDAR", 6, None) {
        return r("ics", "text/calendar");
    }
    if check(sample, b"FUJIFILMCCD-RAW", 0, None) {
        return r("raf", "image/x-fujifilm-raf");
    }
    if check(sample, b"Extended Module:", 0, None) {
        return r("xm", "audio/x-xm");
    }
    if check(sample, b"Creative Voice File", 0, None) {
        return r("voc", "audio/x-voc");
    }
    if let Some(result) = detect_asar(sample) {
        return Some(result);
    }
    if check(
        sample,
        &[0x06, 0x0E, 0x2B, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0D, 0x01, 0x02, 0x01, 0x01, 0x02],
        0,
        None,
    ) {
        return r("mxf", "application/mxf");
    }
    if check(sample, b"SCRM", 44, None) {
        return r("s3m", "audio/x-s3m");
    }
    if sample.len() >= 189 && sample[0] == 0x47 && sample[188] == 0x47 {
        return r("ts", "video/mp2t");
    }
    if sample.len() >= 197 && sample[4] == 0x47 && sample[196] == 0x47 {
        return r("mts", "video/mp2t");
    }
    if check(sample, b"BOOKMOBI", 60, None) {
        return r("mobi", "application/x-mobipocket-ebook");
    }
    if check(sample, b"DICM", 128, None) {
        return r("dcm", "application/dicom");
    }
    if check(
        sample,
        &[
            0x4C, 0x00, 0x00, 0x00, 0x01, 0x14, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
        ],
        0,
        None,
    ) {
        return r("lnk", "application/x.ms.shortcut");
    }
    if check(sample, b"book", 0, None) && check(sample, b"alis", 4, None) {
        return r("alias", "application/x.apple.alias");
    }
    if check(sample, b"Kaydara FBX Binary  \x00", 0, None) {
        return r("fbx", "application/octet-stream");
    }
    if check(sample, &[0x4C, 0x50], 34, None) && check(sample, &[0x00], 8, None) {
        return r("eot", "application/vnd.ms-fontobject");
    }
    if check(
        sample,
        &[
            0x06, 0x06, 0xED, 0xF5, 0xD8, 0x1D, 0x46, 0xE5, 0xBD, 0x31, 0xEF, 0xE7, 0xFE, 0x74,
            0xB7, 0x1D,
        ],
        0,
        None,
    ) {
        return r("indd", "application/x-indesign");
    }
    None
}

fn detect_asar(sample: &[u8]) -> Option<DetectionResult> {
    if !check(sample, &[0x04, 0x00, 0x00, 0x00], 0, None) {
        return None;
    }
    let len_bytes = sample.get(12..16)?;
    let json_len = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;
    let json_bytes = sample.get(16..16 + json_len.min(sample.len().saturating_sub(16)))?;
    let value: serde_json::Value = serde_json::from_slice(json_bytes).ok()?;
    if value.get("files").is_some() {
        Some(DetectionResult::new("asar", "application/x.asar"))
    } else {
        None
    }
}

/// `sample` is grown to (up to) 512 bytes.
pub fn detect_512(sample: &[u8]) -> Option<DetectionResult> {
    if tar::looks_like_tar(sample) {
        return Some(tar::result());
    }
    if check(sample, &[0xFF, 0xFE], 0, None) && check(sample, b"<?xml ", 2, None) {
        return r("xml", "application/xml");
    }
    if check(sample, b"SketchUp Model", 0, None) {
        return r("skp", "application/vnd.sketchup.skp");
    }
    if check(sample, b"Windows Registry Editor Version 5.00", 0, None) {
        return r("reg", "text/plain");
    }
    if check(sample, b"-----BEGIN PGP MESSAGE-----", 0, None) {
        return r("pgp", "application/pgp-encrypted");
    }
    None
}
