//! ZIP entry walker (§4.5). Walks local-file-header entries sequentially —
//! the tokenizer only ever moves forward, so this reads the streaming
//! local-file-header form rather than seeking to the central directory —
//! and decides per entry whether a catalogued ZIP-framed format applies.

use std::io::Read;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalogue::DetectionResult;
use crate::error::Result;
use crate::mime_map;
use crate::tokenizer::Tokenizer;

static DEX_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^classes\d*\.dex$").unwrap());

const MAX_INSPECTED_ENTRY_BODY: usize = 64 * 1024;

/// Walk ZIP entries starting at the current tokenizer position (which must
/// sit on a `PK\x03\x04` local-file-header signature). Returns the first
/// catalogue entry a special-cased filename resolves to, or `zip` as the
/// default fallback once the walk runs out of entries or hits one the
/// streaming reader can't parse further.
pub fn detect(tokenizer: &mut Tokenizer) -> Result<Option<DetectionResult>> {
    loop {
        let entry = match ::zip::read::read_zipfile_from_stream(tokenizer) {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(_) => break,
        };

        let name = entry.name().to_string();
        if let Some(result) = inspect_entry(name, entry) {
            return Ok(Some(result));
        }
    }
    Ok(Some(DetectionResult::new("zip", "application/zip")))
}

fn inspect_entry(name: String, mut entry: impl Read) -> Option<DetectionResult> {
    if name == "META-INF/mozilla.rsa" {
        return Some(DetectionResult::new("xpi", "application/x-xpinstall"));
    }
    if name == "META-INF/MANIFEST.MF" {
        return Some(DetectionResult::new("jar", "application/java-archive"));
    }
    if DEX_ENTRY.is_match(name.rsplit('/').next().unwrap_or(&name)) {
        return Some(DetectionResult::new(
            "apk",
            "application/vnd.android.package-archive",
        ));
    }

    if name == "mimetype" {
        let mut body = String::new();
        if entry.read_to_string(&mut body).is_ok() {
            if let Some(result) = mime_map::lookup(body.trim()) {
                return Some(result);
            }
        }
        return None;
    }

    if name == "[Content_Types].xml" {
        let mut body = String::new();
        let mut limited = entry.take(MAX_INSPECTED_ENTRY_BODY as u64);
        if limited.read_to_string(&mut body).is_ok() {
            if mime_map::is_3mf_content_types(&body) {
                return Some(DetectionResult::new("3mf", "model/3mf"));
            }
            if let Some(media_type) = mime_map::find_main_content_type(&body) {
                if let Some(result) = mime_map::lookup(&media_type) {
                    return Some(result);
                }
            }
        }
        return None;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dex_regex_matches_numbered_variants() {
        assert!(DEX_ENTRY.is_match("classes.dex"));
        assert!(DEX_ENTRY.is_match("classes2.dex"));
        assert!(!DEX_ENTRY.is_match("notclasses.dex"));
    }
}
