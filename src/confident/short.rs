//! The 2-through-12-byte signature arms of the ordered battery (§4.4).
//! First matching arm wins; ordering matters where one signature is a
//! subset of another (JPEG-LS nested inside the generic JPEG prefix, OGG
//! codec dispatch before the generic fallback, ZIP-framed formats probed
//! ahead of plain ZIP via the container walk itself).

use crate::catalogue::DetectionResult;
use crate::config::DetectionConfig;
use crate::containers::{asf, ebml, gzip, isobmff, jp2, ogg, png, tiff, zip};
use crate::error::Result;
use crate::pattern::check;
use crate::pipeline::run_full_pipeline;
use crate::token::id3_sync_safe_u32;
use crate::tokenizer::Tokenizer;

fn r(ext: &'static str, mime: &'static str) -> Option<DetectionResult> {
    Some(DetectionResult::new(ext, mime))
}

/// Try every arm from the 2-byte through 12-byte tiers against `sample`
/// (already peeked, at least 32 bytes where the source permits). Arms that
/// dispatch into a container probe or a nested recursion take `tokenizer`
/// to perform the additional reads.
pub fn detect(
    tokenizer: &mut Tokenizer,
    sample: &[u8],
    config: &DetectionConfig,
) -> Result<Option<DetectionResult>> {
    // -- 2-byte --
    if check(sample, &[0x42, 0x4D], 0, None) {
        return Ok(r("bmp", "image/bmp"));
    }
    if check(sample, &[0x0B, 0x77], 0, None) {
        return Ok(r("ac3", "audio/vnd.dolby.dd-raw"));
    }
    if check(sample, &[0x78, 0x01], 0, None) {
        return Ok(r("dmg", "application/x-apple-diskimage"));
    }
    if check(sample, &[0x4D, 0x5A], 0, None) {
        return Ok(r("exe", "application/vnd.microsoft.portable-executable"));
    }
    if check(sample, &[0x25, 0x21], 0, None) {
        let text = String::from_utf8_lossy(sample);
        return Ok(if text.contains("EPSF-") {
            r("eps", "application/postscript")
        } else {
            r("ps", "application/postscript")
        });
    }
    if check(sample, &[0x1F, 0xA0], 0, None) || check(sample, &[0x1F, 0x9D], 0, None) {
        return Ok(r("z", "application/x-compress"));
    }
    if check(sample, &[0xC7, 0x71], 0, None) {
        return Ok(r("cpio", "application/x-cpio"));
    }
    if check(sample, &[0x60, 0xEA], 0, None) {
        return Ok(r("arj", "application/x-arj"));
    }

    // -- 3-byte --
    if check(sample, &[0xEF, 0xBB, 0xBF], 0, None) {
        tokenizer.skip(3)?;
        return crate::confident::detect(tokenizer, config);
    }
    if check(sample, b"GIF", 0, None) {
        return Ok(r("gif", "image/gif"));
    }
    if check(sample, &[0x49, 0x49, 0xBC], 0, None) {
        return Ok(r("jxr", "image/jxr"));
    }
    if check(sample, &[0x1F, 0x8B, 0x08], 0, None) {
        return gzip::detect(tokenizer, |inner| run_full_pipeline(inner, config));
    }
    if check(sample, &[0x42, 0x5A, 0x68], 0, None) {
        return Ok(r("bz2", "application/x-bzip2"));
    }
    if check(sample, b"ID3", 0, None) {
        tokenizer.skip(6)?; // "ID3"(3) + version(2) + flags(1), size field follows at offset 6
        let size_bytes = tokenizer.read_exact(4)?;
        let length = id3_sync_safe_u32([size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]]);
        let remaining = tokenizer.size().saturating_sub(tokenizer.position());
        if length as u64 >= remaining {
            return Ok(r("mp3", "audio/mpeg"));
        }
        tokenizer.skip(length as u64)?;
        return run_full_pipeline(tokenizer, config);
    }
    if check(sample, b"MP+", 0, None) {
        return Ok(r("mpc", "audio/x-musepack"));
    }
    if (sample.first() == Some(&0x43) || sample.first() == Some(&0x46))
        && check(sample, b"WS", 1, None)
    {
        return Ok(r("swf", "application/x-shockwave-flash"));
    }

    // -- 4-byte --
    if check(sample, &[0xFF, 0xD8, 0xFF], 0, None) {
        return Ok(if sample.get(3) == Some(&0xF7) {
            r("jls", "image/jls")
        } else {
            r("jpg", "image/jpeg")
        });
    }
    if check(sample, b"OTTO", 0, None) {
        return Ok(r("otf", "font/otf"));
    }
    if check(sample, b"FLIF", 0, None) {
        return Ok(r("flif", "image/flif"));
    }
    if check(sample, b"8BPS", 0, None) {
        return Ok(r("psd", "image/vnd.adobe.photoshop"));
    }
    if check(sample, b"MPCK", 0, None) {
        return Ok(r("mpc", "audio/x-musepack"));
    }
    if check(sample, b"FORM", 0, None) {
        return Ok(r("aif", "audio/x-aiff"));
    }
    if check(sample, b"icns", 0, None) {
        return Ok(r("icns", "image/x-icns"));
    }
    if check(sample, &[0x50, 0x4B, 0x03, 0x04], 0, None) {
        return zip::detect(tokenizer);
    }
    if check(sample, b"OggS", 0, None) {
        tokenizer.skip(4)?;
        return ogg::detect(tokenizer);
    }
    if check(sample, b"MThd", 0, None) {
        return Ok(r("mid", "audio/midi"));
    }
    if check(sample, b"wOFF", 0, None) {
        return Ok(r("woff", "font/woff"));
    }
    if check(sample, b"wOF2", 0, None) {
        return Ok(r("woff2", "font/woff2"));
    }
    if check(sample, &[0xD4, 0xC3, 0xB2, 0xA1], 0, None)
        || check(sample, &[0xA1, 0xB2, 0xC3, 0xD4], 0, None)
    {
        return Ok(r("pcap", "application/vnd.tcpdump.pcap"));
    }
    if check(sample, b"DSD ", 0, None) {
        return Ok(r("dsf", "audio/x-dsf"));
    }
    if check(sample, b"LZIP", 0, None) {
        return Ok(r("lz", "application/x-lzip"));
    }
    if check(sample, b"fLaC", 0, None) {
        return Ok(r("flac", "audio/x-flac"));
    }
    if check(sample, &[0x42, 0x50, 0x47, 0xFB], 0, None) {
        return Ok(r("bpg", "image/bpg"));
    }
    if check(sample, b"wvpk", 0, None) {
        return Ok(r("wv", "audio/wavpack"));
    }
    if check(sample, b"%PDF", 0, None) {
        return Ok(r("pdf", "application/pdf"));
    }
    if check(sample, &[0x00, 0x61, 0x73, 0x6D], 0, None) {
        return Ok(r("wasm", "application/wasm"));
    }
    if check(sample, b"II\x2A\x00", 0, None) {
        tokenizer.skip(4)?;
        return tiff::detect(tokenizer, sample, tiff::Endian::Little);
    }
    if check(sample, b"MM\x00\x2A", 0, None) {
        tokenizer.skip(4)?;
        return tiff::detect(tokenizer, sample, tiff::Endian::Big);
    }
    if check(sample, b"MAC ", 0, None) {
        return Ok(r("mac", "audio/ape"));
    }
    if check(sample, &[0x1A, 0x45, 0xDF, 0xA3], 0, None) {
        tokenizer.skip(4)?;
        return ebml::detect(tokenizer);
    }
    if check(sample, b"SQLi", 0, None) {
        return Ok(r("sqlite", "application/vnd.sqlite3"));
    }
    if check(sample, &[b'N', b'E', b'S', 0x1A], 0, None) {
        return Ok(r("nes", "application/x-nintendo-nes-rom"));
    }
    if check(sample, b"Cr24", 0, None) {
        return Ok(r("crx", "application/x-google-chrome-extension"));
    }
    if check(sample, b"MSCF", 0, None) || check(sample, b"ISc(", 0, None) {
        return Ok(r("cab", "application/vnd.ms-cab-compressed"));
    }
    if check(sample, &[0xED, 0xAB, 0xEE, 0xDB], 0, None) {
        return Ok(r("rpm", "application/x-rpm"));
    }
    if check(sample, &[0xC5, 0xD0, 0xD3, 0xC6], 0, None) {
        return Ok(r("eps", "application/postscript"));
    }
    if check(sample, &[0x28, 0xB5, 0x2F, 0xFD], 0, None) {
        return Ok(r("zst", "application/zstd"));
    }
    if check(sample, &[0x7F, b'E', b'L', b'F'], 0, None) {
        return Ok(r("elf", "application/x-executable"));
    }
    if check(sample, b"!BDN", 0, None) {
        return Ok(r("pst", "application/vnd.ms-outlook"));
    }
    if check(sample, b"PAR1", 0, None) || check(sample, b"PARE", 0, None) {
        return Ok(r("parquet", "application/vnd.apache.parquet"));
    }
    if check(sample, b"ttcf", 0, None) {
        return Ok(r("ttc", "font/collection"));
    }
    if check(sample, &[0xCF, 0xFA, 0xED, 0xFE], 0, None) {
        return Ok(r("macho", "application/x-mach-binary"));
    }
    if check(sample, &[0x04, 0x22, 0x4D, 0x18], 0, None) {
        return Ok(r("lz4", "application/x-lz4"));
    }
    if check(sample, b"regf", 0, None) {
        return Ok(r("reg", "text/plain"));
    }

    // -- 5-byte --
    if check(sample, b"#!AMR", 0, None) {
        return Ok(r("amr", "audio/amr"));
    }
    if check(sample, b"{\\rtf", 0, None) {
        return Ok(r("rtf", "text/rtf"));
    }
    if check(sample, b"FLV", 0, None) {
        return Ok(r("flv", "video/x-flv"));
    }
    if check(sample, b"IMPM", 0, None) {
        return Ok(r("it", "audio/x-it"));
    }
    if check(sample, &[0x00, 0x00, 0x01, 0xBA], 0, None) {
        return Ok(r("mpg", "video/mpeg"));
    }
    if check(sample, b"ITSF", 0, None) {
        return Ok(r("chm", "application/vnd.ms-htmlhelp"));
    }
    if check(sample, &[0xCA, 0xFE, 0xBA, 0xBE], 0, None) {
        return Ok(r("class", "application/java-vm"));
    }
    if check(sample, b".RMF", 0, None) {
        return Ok(r("rm", "application/vnd.rn-realmedia"));
    }
    if check(sample, b"DRACO", 0, None) {
        return Ok(r("drc", "application/vnd.google.draco"));
    }

    // -- 6-byte --
    if check(sample, &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00], 0, None) {
        return Ok(r("xz", "application/x-xz"));
    }
    if check(sample, b"<?xml ", 0, None) {
        return Ok(r("xml", "application/xml"));
    }
    if check(sample, &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C], 0, None) {
        return Ok(r("7z", "application/x-7z-compressed"));
    }
    if check(sample, &[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07], 0, None)
        && matches!(sample.get(6), Some(0) | Some(1))
    {
        return Ok(r("rar", "application/x-rar-compressed"));
    }
    if check(sample, b"solid ", 0, None) {
        return Ok(r("stl", "model/stl"));
    }
    if check(sample, b"AC", 0, None) {
        if let Some(version) = parse_dwg_version(sample) {
            if (1000..=1050).contains(&version) {
                return Ok(r("dwg", "image/vnd.dwg"));
            }
        }
    }
    if check(sample, b"070707", 0, None) {
        return Ok(r("cpio", "application/x-cpio"));
    }

    // -- 7-byte --
    if check(sample, b"BLENDER", 0, None) {
        return Ok(r("blend", "application/x-blender"));
    }
    if check(sample, b"!<arch>", 0, None) {
        tokenizer.skip(8)?;
        let marker = tokenizer.peek(13)?;
        return Ok(if marker == b"debian-binary" {
            r("deb", "application/vnd.debian.binary-package")
        } else {
            r("ar", "application/x-unix-archive")
        });
    }
    if check(sample, b"WEBVTT", 0, None)
        && matches!(sample.get(6), None | Some(b'\n') | Some(b'\r') | Some(b'\t') | Some(b' '))
    {
        return Ok(r("vtt", "text/vtt"));
    }

    // -- 8-byte --
    if check(sample, &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A], 0, None) {
        tokenizer.skip(8)?;
        return png::detect(tokenizer);
    }
    if check(sample, b"PAR2\x00PKT", 0, None) {
        return Ok(r("par2", "application/x-par2"));
    }
    if check(sample, b"ARROW1", 0, None) {
        return Ok(r("arrow", "application/vnd.apache.arrow.file"));
    }
    if check(sample, b"glTF", 0, None) {
        return Ok(r("glb", "model/gltf-binary"));
    }
    if check(sample, b"free", 4, None)
        || check(sample, b"mdat", 4, None)
        || check(sample, b"moov", 4, None)
        || check(sample, b"wide", 4, None)
    {
        return Ok(r("mov", "video/quicktime"));
    }

    // -- 9-byte --
    if check(sample, b"IIRS", 0, None) || check(sample, b"MMOR", 0, None) {
        return Ok(r("orf", "image/x-olympus-orf"));
    }
    if check(sample, b"gimp xcf ", 0, None) {
        return Ok(r("xcf", "image/x-xcf"));
    }
    if sample.len() >= 12
        && check(sample, b"ftyp", 4, None)
        && sample.get(8).map(|b| b & 0x60 != 0).unwrap_or(false)
    {
        return Ok(isobmff::detect(sample));
    }

    // -- 10-byte --
    if check(sample, b"REGEDIT4\r\n", 0, None) {
        return Ok(r("reg", "text/plain"));
    }

    // -- 12-byte --
    if check(sample, b"RIFF", 0, None) {
        return Ok(if check(sample, b"WEBP", 8, None) {
            r("webp", "image/webp")
        } else if check(sample, b"AVI ", 8, None) {
            r("avi", "video/x-msvideo")
        } else if check(sample, b"WAVE", 8, None) {
            r("wav", "audio/x-wav")
        } else if check(sample, b"QLCM", 8, None) {
            r("qcp", "audio/qcelp")
        } else {
            None
        });
    }
    if check(sample, b"II\x55\x00", 0, None) {
        return Ok(r("rw2", "image/x-panasonic-rw2"));
    }
    if check(
        sample,
        &[
            0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62,
            0xCE, 0x6C,
        ],
        0,
        None,
    ) {
        tokenizer.skip(16)?;
        return asf::detect(tokenizer);
    }
    if check(sample, b"\xABKTX 11\xBB\r\n\x1A\n", 0, None) {
        return Ok(r("ktx", "image/ktx"));
    }
    if check(sample, &[0x7E, 0x10], 0, None) || check(sample, &[0x10, 0x7E], 0, None) {
        return Ok(r("mie", "application/x-mie"));
    }
    if check(sample, &[0x00, 0x00, 0x27, 0x0A], 0, None) {
        return Ok(r("shp", "application/octet-stream"));
    }
    if check(sample, &[0xFF, 0x4F, 0xFF, 0x51], 0, None) {
        return Ok(r("j2c", "image/j2c"));
    }
    if check(sample, &[0x00, 0x00, 0x00, 0x0C, b'j', b'P', 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A], 0, None) {
        tokenizer.skip(12)?;
        return jp2::detect(tokenizer);
    }
    if check(sample, &[0xFF, 0x0A], 0, None) {
        return Ok(r("jxl", "image/jxl"));
    }
    if check(
        sample,
        &[0x00, 0x00, 0x00, 0x0C, b'J', b'X', b'L', 0x20, 0x0D, 0x0A, 0x87, 0x0A],
        0,
        None,
    ) {
        return Ok(r("jxl", "image/jxl"));
    }
    if check(sample, &[0xFE, 0xFF], 0, None) && check(sample, b"<?xml ", 2, None) {
        return Ok(r("xml", "application/xml"));
    }
    if check(
        sample,
        &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1],
        0,
        None,
    ) {
        // The root storage CLSID (if present) distinguishes an MSI
        // installer database from any other CFB-contained document; it
        // lands well past the 32-byte signature tier's sample, so peek
        // further rather than waiting for a later tier to re-run this arm.
        let extended = tokenizer.peek(4096)?;
        return Ok(if contains_subsequence(&extended, &MSI_ROOT_STORAGE_CLSID) {
            r("msi", "application/x-msi")
        } else {
            r("cfb", "application/x-cfb")
        });
    }

    Ok(None)
}

/// The root storage CLSID `{000C1084-0000-0000-C000-000000000046}`
/// ("MSI Installer"), encoded as it appears on the wire.
const MSI_ROOT_STORAGE_CLSID: [u8; 16] = [
    0x84, 0x10, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
];

fn contains_subsequence(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn parse_dwg_version(sample: &[u8]) -> Option<u32> {
    let digits = sample.get(2..6)?;
    let text = std::str::from_utf8(digits).ok()?;
    text.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bytes: &[u8]) -> Option<DetectionResult> {
        let config = DetectionConfig::default();
        let mut t = Tokenizer::from_bytes(bytes.to_vec());
        let sample = t.peek(bytes.len().max(32)).unwrap();
        detect(&mut t, &sample, &config).unwrap()
    }

    #[test]
    fn par2_packet_header_detected() {
        let mut bytes = b"PAR2\x00PKT".to_vec();
        bytes.resize(32, 0);
        assert_eq!(run(&bytes).unwrap().ext, "par2");
    }

    #[test]
    fn cfb_with_msi_root_storage_clsid_reports_msi() {
        let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        bytes.resize(64, 0);
        bytes.extend_from_slice(&MSI_ROOT_STORAGE_CLSID);
        assert_eq!(run(&bytes).unwrap().ext, "msi");
    }

    #[test]
    fn cfb_without_msi_clsid_reports_generic_cfb() {
        let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        bytes.resize(64, 0);
        assert_eq!(run(&bytes).unwrap().ext, "cfb");
    }

    #[test]
    fn eps_text_marker_distinguished_from_plain_postscript() {
        let mut eps = b"%!PS-Adobe-3.0 EPSF-3.0".to_vec();
        eps.resize(32, b' ');
        assert_eq!(run(&eps).unwrap().ext, "eps");

        let mut ps = b"%!PS-Adobe-3.0".to_vec();
        ps.resize(32, b' ');
        assert_eq!(run(&ps).unwrap().ext, "ps");
    }

    #[test]
    fn jpeg_ls_distinguished_from_plain_jpeg() {
        let jls = [0xFF, 0xD8, 0xFF, 0xF7, 0, 0, 0, 0];
        assert_eq!(run(&jls).unwrap().ext, "jls");

        let jpg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];
        assert_eq!(run(&jpg).unwrap().ext, "jpg");
    }

    #[test]
    fn riff_subtype_dispatch() {
        let mut webp = b"RIFF\0\0\0\0WEBP".to_vec();
        webp.resize(32, 0);
        assert_eq!(run(&webp).unwrap().ext, "webp");

        let mut wav = b"RIFF\0\0\0\0WAVE".to_vec();
        wav.resize(32, 0);
        assert_eq!(run(&wav).unwrap().ext, "wav");

        let mut unknown_subtype = b"RIFF\0\0\0\0XXXX".to_vec();
        unknown_subtype.resize(32, 0);
        assert!(run(&unknown_subtype).is_none());
    }

    #[test]
    fn rar_requires_a_known_version_byte() {
        let mut rar = vec![0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x01];
        rar.resize(32, 0);
        assert_eq!(run(&rar).unwrap().ext, "rar");

        let mut bad_version = vec![0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x05];
        bad_version.resize(32, 0);
        assert!(run(&bad_version).is_none());
    }

    #[test]
    fn dwg_version_must_fall_in_the_documented_range() {
        assert_eq!(parse_dwg_version(b"AC1021"), Some(1021));
        assert_eq!(parse_dwg_version(b"ACxxxx"), None);
    }

    #[test]
    fn id3_with_length_covering_the_rest_of_the_source_falls_back_to_mp3() {
        let mut bytes = b"ID3\x04\x00\x00".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 10]); // sync-safe length, larger than remaining bytes
        bytes.extend_from_slice(b"short");
        assert_eq!(run(&bytes).unwrap().ext, "mp3");
    }

    #[test]
    fn id3_tag_is_skipped_to_recurse_into_the_embedded_stream() {
        // header(10) + a 4-byte tag body, then a FLAC stream the tag wraps.
        let mut bytes = b"ID3\x04\x00\x00".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 4]); // sync-safe length: 4 bytes of tag body follow
        bytes.extend_from_slice(b"TAG!");
        bytes.extend_from_slice(b"fLaC");
        assert_eq!(run(&bytes).unwrap().ext, "flac");
    }

    #[test]
    fn webvtt_requires_a_trailing_boundary_character() {
        let mut valid = b"WEBVTT\n".to_vec();
        valid.resize(32, 0);
        assert_eq!(run(&valid).unwrap().ext, "vtt");

        let mut invalid = b"WEBVTTX".to_vec();
        invalid.resize(32, 0);
        assert!(run(&invalid).is_none());
    }
}
