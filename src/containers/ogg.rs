//! OGG codec-ID dispatch (§4.5). Called with the tokenizer positioned right
//! after the `OggS` signature.

use crate::catalogue::DetectionResult;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

/// Skip the 28-byte page header remainder, read the 8-byte codec
/// identifier, and dispatch. Defaults to `ogx` when no known codec header
/// matches — OGG is a container, not every stream inside it is catalogued.
pub fn detect(tokenizer: &mut Tokenizer) -> Result<Option<DetectionResult>> {
    tokenizer.skip(28)?;
    let id = tokenizer.peek(8)?;

    let result = if id.len() >= 8 && &id[0..8] == b"OpusHead" {
        ("opus", "audio/opus")
    } else if id.len() >= 7 && &id[0..7] == b"\x80theora" {
        ("ogv", "video/ogg")
    } else if id.len() >= 6 && &id[0..6] == b"\x01video" {
        ("ogv", "video/ogg")
    } else if id.len() >= 8 && &id[0..8] == b"\x7FFLAC\x00\x00\x00" {
        ("oga", "audio/ogg")
    } else if id.len() >= 6 && &id[0..6] == b"Speex " {
        ("spx", "audio/ogg")
    } else if id.len() >= 7 && &id[0..7] == b"\x01vorbis" {
        ("ogg", "audio/ogg")
    } else {
        ("ogx", "application/ogg")
    };
    Ok(Some(DetectionResult::new(result.0, result.1)))
}
