//! The transparent detection stream (§4.9): buffers a prefix of the source,
//! runs the pipeline against it, then exposes a `Read` that replays the
//! buffered prefix followed by the rest of the original source. The
//! detection result rides along as an out-of-band attribute.

use std::io::Read;

use crate::catalogue::DetectionResult;
use crate::config::DetectionConfig;
use crate::error::SniffError;
use crate::pipeline::Pipeline;
use crate::tokenizer::Tokenizer;

/// A `Read` wrapper that transparently detects the format of its source
/// without consuming it from the caller's perspective.
pub struct SniffingReader {
    result: Option<DetectionResult>,
    prefix: Vec<u8>,
    prefix_pos: usize,
    rest: Box<dyn Read>,
}

impl SniffingReader {
    /// Buffer the first `config.sample_size` bytes of `source`, run the
    /// pipeline against that prefix, and wrap the result together with a
    /// pass-through over the buffered prefix plus whatever remains of
    /// `source`. End-of-source while filling the prefix is not an error —
    /// it yields `result() == None` ("unknown") but the stream still
    /// replays whatever bytes were read.
    pub fn new(mut source: impl Read + 'static, config: DetectionConfig) -> Self {
        let mut prefix = vec![0u8; config.sample_size];
        let mut filled = 0;
        while filled < prefix.len() {
            match source.read(&mut prefix[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(_) => break,
            }
        }
        prefix.truncate(filled);

        let pipeline = Pipeline::new(config);
        let mut tokenizer = Tokenizer::from_bytes(prefix.clone());
        let result = match pipeline.detect(&mut tokenizer) {
            Ok(result) => result,
            Err(SniffError::EndOfSource) => None,
            Err(_) => None,
        };

        Self {
            result,
            prefix,
            prefix_pos: 0,
            rest: Box::new(source),
        }
    }

    /// The format detected from the buffered prefix, or `None` for
    /// "unknown". Available immediately after construction, before any
    /// bytes are read from the stream.
    pub fn result(&self) -> Option<DetectionResult> {
        self.result
    }
}

impl Read for SniffingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.prefix_pos < self.prefix.len() {
            let available = &self.prefix[self.prefix_pos..];
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            self.prefix_pos += n;
            return Ok(n);
        }
        self.rest.read(buf)
    }
}
