//! File format detection from byte content: an ordered battery of magic
//! numbers and container probes that classifies a source as a `{ext, mime}`
//! pair drawn from a closed catalogue, or reports it as unknown.
//!
//! The public surface is small and mirrors the three things a caller does
//! with `exhume_body`'s `Body`: open a source ([`Tokenizer`]), configure how
//! it's read ([`DetectionConfig`]), and run detection against it
//! ([`Pipeline`]). [`SniffingReader`] additionally lets detection happen
//! transparently in front of a stream the caller still wants to consume.

pub mod catalogue;
pub mod config;
pub mod confident;
pub mod containers;
pub mod detector;
pub mod error;
pub mod imprecise;
pub mod mime_map;
pub mod pattern;
pub mod pipeline;
pub mod stream;
pub mod token;
pub mod tokenizer;

pub use catalogue::DetectionResult;
pub use config::DetectionConfig;
pub use detector::Detector;
pub use error::{Result, SniffError};
pub use pipeline::Pipeline;
pub use stream::SniffingReader;
pub use tokenizer::{CancellationToken, Tokenizer};

/// Detect the format of a file on disk, reading no more of it than the
/// battery needs.
pub fn detect_file(path: impl AsRef<std::path::Path>) -> Result<Option<DetectionResult>> {
    let mut tokenizer = Tokenizer::from_path(path)?;
    let pipeline = Pipeline::new(DetectionConfig::default());
    pipeline.detect(&mut tokenizer)
}

/// Detect the format of an in-memory buffer.
pub fn detect_bytes(bytes: Vec<u8>) -> Result<Option<DetectionResult>> {
    let mut tokenizer = Tokenizer::from_bytes(bytes);
    let pipeline = Pipeline::new(DetectionConfig::default());
    pipeline.detect(&mut tokenizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_bytes_matches_a_known_signature() {
        let result = detect_bytes(vec![0x42, 0x4D, 0, 0]).unwrap().unwrap();
        assert_eq!(result.ext, "bmp");
    }

    #[test]
    fn detect_bytes_reports_unknown_for_empty_input() {
        assert!(detect_bytes(vec![]).unwrap().is_none());
    }
}
