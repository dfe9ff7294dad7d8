//! ISO-BMFF `ftyp` brand dispatch (§4.4, 9-byte tier). Covers the MP4/MOV/
//! HEIC/AVIF family sharing the same box structure.

use crate::catalogue::DetectionResult;

/// `sample` must hold at least 12 bytes, with `ftyp` already confirmed at
/// offset 4. Reads the brand major at offset 8 and dispatches.
pub fn detect(sample: &[u8]) -> Option<DetectionResult> {
    if sample.len() < 12 {
        return None;
    }
    let raw = &sample[8..12];
    let brand = raw
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect::<String>();
    let brand = brand.trim();

    let result = match brand {
        "avif" | "avis" => ("avif", "image/avif"),
        "mif1" => ("heic", "image/heic"),
        "msf1" => ("heic", "image/heic-sequence"),
        "heic" | "heix" => ("heic", "image/heic"),
        "hevc" | "hevx" => ("heic", "image/heic-sequence"),
        "qt" => ("mov", "video/quicktime"),
        "M4V" | "M4VH" | "M4VP" => ("m4v", "video/x-m4v"),
        "M4P" => ("m4p", "video/mp4"),
        "M4B" => ("m4b", "audio/mp4"),
        "M4A" => ("m4a", "audio/mp4"),
        "F4V" => ("f4v", "video/mp4"),
        "F4P" => ("f4p", "video/mp4"),
        "F4A" => ("f4a", "audio/mp4"),
        "F4B" => ("f4b", "audio/mp4"),
        "crx" => ("cr3", "image/x-canon-cr3"),
        _ if brand.starts_with("3g2") => ("3g2", "video/3gpp2"),
        _ if brand.starts_with("3g") => ("3gp", "video/3gpp"),
        _ => ("mp4", "video/mp4"),
    };
    Some(DetectionResult::new(result.0, result.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_with_brand(brand: &[u8]) -> Vec<u8> {
        let mut sample = vec![0u8; 12];
        sample[4..8].copy_from_slice(b"ftyp");
        let n = brand.len().min(4);
        sample[8..8 + n].copy_from_slice(&brand[..n]);
        sample
    }

    #[test]
    fn heic_brand() {
        let sample = sample_with_brand(b"heic");
        assert_eq!(detect(&sample).unwrap().ext, "heic");
    }

    #[test]
    fn three_gpp_family() {
        assert_eq!(detect(&sample_with_brand(b"3gp5")).unwrap().ext, "3gp");
        assert_eq!(detect(&sample_with_brand(b"3g2a")).unwrap().ext, "3g2");
    }

    #[test]
    fn default_brand_is_mp4() {
        assert_eq!(detect(&sample_with_brand(b"isom")).unwrap().ext, "mp4");
    }

    #[test]
    fn crx_brand_maps_to_cr3() {
        assert_eq!(detect(&sample_with_brand(b"crx\0")).unwrap().ext, "cr3");
    }
}
