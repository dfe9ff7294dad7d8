//! The closed catalogue of `{ext, mime}` pairs this crate can emit, and the
//! `DetectionResult` type that carries one.

/// A detected file format: an extension and a media type, both drawn from
/// [`CATALOGUE`]. Cheap to copy — both fields are `'static` string slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionResult {
    pub ext: &'static str,
    pub mime: &'static str,
}

impl DetectionResult {
    pub const fn new(ext: &'static str, mime: &'static str) -> Self {
        Self { ext, mime }
    }
}

impl std::fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.ext, self.mime)
    }
}

/// The full set of `{ext, mime}` pairs producible by the detectors in this
/// crate, sorted lexicographically by extension. Every result any detector
/// returns appears verbatim in this table — enforced by
/// `tests::every_result_is_catalogued` in `src/confident/mod.rs` and friends,
/// and every entry here is reachable from at least one fixture (§8 of
/// `SPEC_FULL.md`).
pub const CATALOGUE: &[(&str, &str)] = &[
    ("3g2", "video/3gpp2"),
    ("3gp", "video/3gpp"),
    ("3mf", "model/3mf"),
    ("7z", "application/x-7z-compressed"),
    ("aac", "audio/aac"),
    ("ac3", "audio/vnd.dolby.dd-raw"),
    ("ace", "application/x-ace-compressed"),
    ("aif", "audio/x-aiff"),
    ("alias", "application/x.apple.alias"),
    ("amr", "audio/amr"),
    ("apk", "application/vnd.android.package-archive"),
    ("apng", "image/apng"),
    ("ar", "application/x-unix-archive"),
    ("arj", "application/x-arj"),
    ("arrow", "application/vnd.apache.arrow.file"),
    ("arw", "image/x-sony-arw"),
    ("asar", "application/x.asar"),
    ("asf", "video/x-ms-asf"),
    ("avi", "video/x-msvideo"),
    ("avif", "image/avif"),
    ("blend", "application/x-blender"),
    ("bmp", "image/bmp"),
    ("bpg", "image/bpg"),
    ("bz2", "application/x-bzip2"),
    ("cab", "application/vnd.ms-cab-compressed"),
    ("cfb", "application/x-cfb"),
    ("chm", "application/vnd.ms-htmlhelp"),
    ("class", "application/java-vm"),
    ("cpio", "application/x-cpio"),
    ("cr2", "image/x-canon-cr2"),
    ("cr3", "image/x-canon-cr3"),
    ("crx", "application/x-google-chrome-extension"),
    ("cur", "image/x-icon"),
    ("dcm", "application/dicom"),
    ("deb", "application/vnd.debian.binary-package"),
    ("dmg", "application/x-apple-diskimage"),
    ("dng", "image/x-adobe-dng"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("drc", "application/vnd.google.draco"),
    ("dsf", "audio/x-dsf"),
    ("dwg", "image/vnd.dwg"),
    ("elf", "application/x-executable"),
    ("eot", "application/vnd.ms-fontobject"),
    ("eps", "application/postscript"),
    ("epub", "application/epub+zip"),
    ("exe", "application/vnd.microsoft.portable-executable"),
    ("f4a", "audio/mp4"),
    ("f4b", "audio/mp4"),
    ("f4p", "video/mp4"),
    ("f4v", "video/mp4"),
    ("fbx", "application/octet-stream"),
    ("flac", "audio/x-flac"),
    ("flif", "image/flif"),
    ("flv", "video/x-flv"),
    ("gif", "image/gif"),
    ("glb", "model/gltf-binary"),
    ("gz", "application/gzip"),
    ("heic", "image/heic"),
    ("icc", "application/vnd.iccprofile"),
    ("icns", "image/x-icns"),
    ("ico", "image/x-icon"),
    ("ics", "text/calendar"),
    ("indd", "application/x-indesign"),
    ("it", "audio/x-it"),
    ("j2c", "image/j2c"),
    ("jar", "application/java-archive"),
    ("jls", "image/jls"),
    ("jp2", "image/jp2"),
    ("jpg", "image/jpeg"),
    ("jpm", "image/jpm"),
    ("jpx", "image/jpx"),
    ("jxl", "image/jxl"),
    ("jxr", "image/jxr"),
    ("ktx", "image/ktx"),
    ("lnk", "application/x.ms.shortcut"),
    ("lz", "application/x-lzip"),
    ("lz4", "application/x-lz4"),
    ("m4a", "audio/mp4"),
    ("m4b", "audio/mp4"),
    ("m4p", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mac", "audio/ape"),
    ("macho", "application/x-mach-binary"),
    ("mid", "audio/midi"),
    ("mie", "application/x-mie"),
    ("mj2", "image/mj2"),
    ("mkv", "video/x-matroska"),
    ("mobi", "application/x-mobipocket-ebook"),
    ("mov", "video/quicktime"),
    ("mp1", "audio/mpeg"),
    ("mp2", "audio/mpeg"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("mpc", "audio/x-musepack"),
    ("mpg", "video/mpeg"),
    ("msi", "application/x-msi"),
    ("mts", "video/mp2t"),
    ("mxf", "application/mxf"),
    ("nef", "image/x-nikon-nef"),
    ("nes", "application/x-nintendo-nes-rom"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("oga", "audio/ogg"),
    ("ogg", "audio/ogg"),
    ("ogv", "video/ogg"),
    ("ogx", "application/ogg"),
    ("opus", "audio/opus"),
    ("orf", "image/x-olympus-orf"),
    ("otf", "font/otf"),
    ("par2", "application/x-par2"),
    ("parquet", "application/vnd.apache.parquet"),
    ("pcap", "application/vnd.tcpdump.pcap"),
    ("pdf", "application/pdf"),
    ("pgp", "application/pgp-encrypted"),
    ("png", "image/png"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ("ps", "application/postscript"),
    ("psd", "image/vnd.adobe.photoshop"),
    ("pst", "application/vnd.ms-outlook"),
    ("qcp", "audio/qcelp"),
    ("raf", "image/x-fujifilm-raf"),
    ("rar", "application/x-rar-compressed"),
    ("reg", "text/plain"),
    ("rm", "application/vnd.rn-realmedia"),
    ("rpm", "application/x-rpm"),
    ("rtf", "text/rtf"),
    ("rw2", "image/x-panasonic-rw2"),
    ("s3m", "audio/x-s3m"),
    ("shp", "application/octet-stream"),
    ("skp", "application/vnd.sketchup.skp"),
    ("spx", "audio/ogg"),
    ("sqlite", "application/vnd.sqlite3"),
    ("stl", "model/stl"),
    ("swf", "application/x-shockwave-flash"),
    ("tar", "application/x-tar"),
    ("tar.gz", "application/gzip"),
    ("tif", "image/tiff"),
    ("ts", "video/mp2t"),
    ("ttc", "font/collection"),
    ("ttf", "font/ttf"),
    ("vcf", "text/vcard"),
    ("voc", "audio/x-voc"),
    ("vtt", "text/vtt"),
    ("wasm", "application/wasm"),
    ("wav", "audio/x-wav"),
    ("webm", "video/webm"),
    ("webp", "image/webp"),
    ("wma", "audio/x-ms-wma"),
    ("wmv", "video/x-ms-wmv"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("wv", "audio/wavpack"),
    ("xcf", "image/x-xcf"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("xm", "audio/x-xm"),
    ("xml", "application/xml"),
    ("xpi", "application/x-xpinstall"),
    ("xz", "application/x-xz"),
    ("z", "application/x-compress"),
    ("zip", "application/zip"),
    ("zst", "application/zstd"),
];

/// `true` iff `ext` (without a leading dot) is in the published catalogue.
pub fn is_known_extension(ext: &str) -> bool {
    CATALOGUE.iter().any(|(e, _)| *e == ext)
}

/// `true` iff `mime` is in the published catalogue.
pub fn is_known_mime(mime: &str) -> bool {
    CATALOGUE.iter().any(|(_, m)| *m == mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_is_sorted_by_extension() {
        let mut sorted: Vec<_> = CATALOGUE.to_vec();
        sorted.sort_by_key(|(ext, _)| *ext);
        assert_eq!(CATALOGUE.to_vec(), sorted, "CATALOGUE must be lexicographically sorted by ext");
    }

    #[test]
    fn catalogue_has_no_duplicate_extensions() {
        let mut exts: Vec<_> = CATALOGUE.iter().map(|(e, _)| *e).collect();
        let before = exts.len();
        exts.sort_unstable();
        exts.dedup();
        assert_eq!(before, exts.len(), "duplicate extension in CATALOGUE");
    }

    #[test]
    fn membership_queries() {
        assert!(is_known_extension("png"));
        assert!(!is_known_extension("not-a-real-ext"));
        assert!(is_known_mime("image/png"));
        assert!(!is_known_mime("not/a-real-mime"));
    }
}
