//! Closed lookup from archive-embedded media-type strings to catalogue
//! entries: OpenDocument `mimetype` bodies, OOXML `[Content_Types].xml`
//! override types, and the 3MF content-type string.

use crate::catalogue::DetectionResult;

const MIME_TABLE: &[(&str, &str, &str)] = &[
    (
        "application/vnd.oasis.opendocument.text",
        "odt",
        "application/vnd.oasis.opendocument.text",
    ),
    (
        "application/vnd.oasis.opendocument.spreadsheet",
        "ods",
        "application/vnd.oasis.opendocument.spreadsheet",
    ),
    (
        "application/vnd.oasis.opendocument.presentation",
        "odp",
        "application/vnd.oasis.opendocument.presentation",
    ),
    (
        "application/epub+zip",
        "epub",
        "application/epub+zip",
    ),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    (
        "application/vnd.ms-package.3dmanufacturing-3dmodel+xml",
        "3mf",
        "model/3mf",
    ),
];

/// Look up a mime string observed inside an archive (ODF `mimetype` body,
/// OOXML override type, 3MF content type) and map it to a catalogue entry.
pub fn lookup(mime: &str) -> Option<DetectionResult> {
    MIME_TABLE
        .iter()
        .find(|(key, _, _)| *key == mime)
        .map(|(_, ext, out_mime)| DetectionResult::new(ext, out_mime))
}

/// `true` iff `content_types_xml` contains the 3MF content-type marker,
/// checked before falling back to the generic OOXML override scan.
pub fn is_3mf_content_types(content_types_xml: &str) -> bool {
    content_types_xml.contains("application/vnd.ms-package.3dmanufacturing-3dmodel+xml")
}

/// Extract the last quoted string preceding `.main+xml"` in a
/// `[Content_Types].xml` body, the OOXML "which app owns this zip" marker.
pub fn find_main_content_type(content_types_xml: &str) -> Option<String> {
    let marker = ".main+xml\"";
    let marker_pos = content_types_xml.find(marker)?;
    let before = &content_types_xml[..marker_pos + marker.len() - 1];
    let quote_pos = before.rfind('"')?;
    Some(before[quote_pos + 1..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odf_mimetype_resolves() {
        let result = lookup("application/vnd.oasis.opendocument.text").unwrap();
        assert_eq!(result.ext, "odt");
    }

    #[test]
    fn unknown_mime_resolves_to_none() {
        assert!(lookup("application/x-not-a-real-type").is_none());
    }

    #[test]
    fn extracts_ooxml_main_content_type() {
        let xml = r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#;
        assert_eq!(
            find_main_content_type(xml).as_deref(),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml")
        );
    }

    #[test]
    fn detects_3mf_content_types() {
        let xml = r#"<Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>"#;
        assert!(is_3mf_content_types(xml));
    }
}
