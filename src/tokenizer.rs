//! Positioned byte cursor over a bounded or unbounded [`Read`] source.
//!
//! Plays the same role for the detection engine that `RAW`/`EWF`/`VMDK` play
//! for `exhume_body`: a thin wrapper that turns an arbitrary byte source into
//! something the rest of the crate can `peek`/`read`/`skip` against without
//! caring whether the bytes came from a file, a buffer, or a stream.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Result, SniffError};
use crate::token::Token;

/// Cooperative cancellation signal observed by every tokenizer I/O method.
///
/// Cloning shares the same underlying flag; `cancel()` from any clone is
/// visible to all others. The default token never fires.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A positioned cursor over a boxed [`Read`] source.
///
/// `size` is `None` when the source's length is not known up front (a plain
/// stream); detectors that need a bound treat that as `u64::MAX`.
pub struct Tokenizer {
    reader: Box<dyn Read>,
    /// Bytes read ahead of `position` via `peek` but not yet consumed.
    lookahead: Vec<u8>,
    position: u64,
    size: Option<u64>,
    cancellation: CancellationToken,
}

impl Tokenizer {
    /// Wrap an arbitrary stream whose total length is not known.
    pub fn new(reader: impl Read + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            lookahead: Vec::new(),
            position: 0,
            size: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Wrap a stream of known total length.
    pub fn with_size(reader: impl Read + 'static, size: u64) -> Self {
        let mut tokenizer = Self::new(reader);
        tokenizer.size = Some(size);
        tokenizer
    }

    /// Wrap a contiguous in-memory byte buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self::with_size(Cursor::new(bytes), size)
    }

    /// Open a file on disk as a bounded byte source.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Self::with_size(file, size))
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// In-place counterpart to [`Self::with_cancellation`], for callers that
    /// only hold a `&mut Tokenizer` (e.g. [`crate::pipeline::Pipeline::detect`]
    /// wiring in its [`crate::config::DetectionConfig::cancellation`]).
    pub fn set_cancellation(&mut self, cancellation: CancellationToken) {
        self.cancellation = cancellation;
    }

    /// Current absolute position, in bytes from the start of the source.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total source length, or `u64::MAX` if unknown.
    pub fn size(&self) -> u64 {
        self.size.unwrap_or(u64::MAX)
    }

    fn check_cancellation(&self) -> Result<()> {
        if self.cancellation.is_cancelled() {
            Err(SniffError::Aborted)
        } else {
            Ok(())
        }
    }

    /// Top up `lookahead` until it holds at least `len` bytes or the
    /// underlying source is exhausted.
    fn fill(&mut self, len: usize) -> Result<()> {
        self.check_cancellation()?;
        while self.lookahead.len() < len {
            let mut chunk = vec![0u8; len - self.lookahead.len()];
            let n = self.reader.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            self.lookahead.extend_from_slice(&chunk[..n]);
        }
        Ok(())
    }

    /// Fill `dst` from the current position without advancing it. Returns the
    /// number of bytes actually available (`<= dst.len()`).
    pub fn peek(&mut self, len: usize) -> Result<Vec<u8>> {
        self.fill(len)?;
        let actual = len.min(self.lookahead.len());
        Ok(self.lookahead[..actual].to_vec())
    }

    /// Like [`Self::peek`] but fails with [`SniffError::EndOfSource`] unless
    /// exactly `len` bytes are available.
    pub fn peek_exact(&mut self, len: usize) -> Result<Vec<u8>> {
        let buf = self.peek(len)?;
        if buf.len() != len {
            return Err(SniffError::EndOfSource);
        }
        Ok(buf)
    }

    /// Consume and return up to `len` bytes from the current position.
    pub fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        let buf = self.peek(len)?;
        self.lookahead.drain(..buf.len());
        self.position += buf.len() as u64;
        Ok(buf)
    }

    /// Like [`Self::read`] but fails unless exactly `len` bytes were consumed.
    pub fn read_exact(&mut self, len: usize) -> Result<Vec<u8>> {
        let buf = self.read(len)?;
        if buf.len() != len {
            return Err(SniffError::EndOfSource);
        }
        Ok(buf)
    }

    /// Advance the position by exactly `n` bytes, discarding them.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let mut remaining = n;
        while remaining > 0 {
            let chunk = (remaining.min(64 * 1024)) as usize;
            let got = self.read(chunk)?;
            if got.is_empty() {
                return Err(SniffError::EndOfSource);
            }
            remaining -= got.len() as u64;
        }
        Ok(())
    }

    pub fn peek_token<T: Token>(&mut self) -> Result<T> {
        let bytes = self.peek_exact(T::SIZE)?;
        T::from_bytes(&bytes)
    }

    pub fn read_token<T: Token>(&mut self) -> Result<T> {
        let bytes = self.read_exact(T::SIZE)?;
        T::from_bytes(&bytes)
    }
}

/// Lets a [`Tokenizer`] stand in wherever a plain `Read` is expected — the
/// ZIP local-file-header walker in `src/containers/zip.rs` is written
/// against the external `zip` crate's streaming reader, which only asks for
/// `Read`.
impl Read for Tokenizer {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let chunk = Tokenizer::read(self, buf.len()).map_err(|err| match err {
            SniffError::Io(io_err) => io_err,
            other => std::io::Error::other(other),
        })?;
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_advance_position() {
        let mut t = Tokenizer::from_bytes(vec![1, 2, 3, 4]);
        assert_eq!(t.peek(2).unwrap(), vec![1, 2]);
        assert_eq!(t.position(), 0);
        assert_eq!(t.read(2).unwrap(), vec![1, 2]);
        assert_eq!(t.position(), 2);
    }

    #[test]
    fn peek_past_end_truncates() {
        let mut t = Tokenizer::from_bytes(vec![1, 2]);
        assert_eq!(t.peek(10).unwrap(), vec![1, 2]);
        assert!(t.peek_exact(10).is_err());
    }

    #[test]
    fn skip_past_end_errors() {
        let mut t = Tokenizer::from_bytes(vec![1, 2]);
        assert!(t.skip(5).is_err());
    }

    #[test]
    fn cancellation_aborts_io() {
        let token = CancellationToken::new();
        let mut t = Tokenizer::from_bytes(vec![1, 2, 3]).with_cancellation(token.clone());
        token.cancel();
        match t.peek(1) {
            Err(SniffError::Aborted) => {}
            other => panic!("expected Aborted, got {other:?}"),
        }
    }

    #[test]
    fn empty_source_peeks_empty() {
        let mut t = Tokenizer::from_bytes(vec![]);
        assert_eq!(t.peek(4).unwrap(), Vec::<u8>::new());
        assert_eq!(t.size(), 0);
    }

    #[test]
    fn from_path_reads_a_real_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &[0x42, 0x4D, 0, 0]).unwrap();
        let mut t = Tokenizer::from_path(file.path()).unwrap();
        assert_eq!(t.size(), 4);
        assert_eq!(t.read(2).unwrap(), vec![0x42, 0x4D]);
    }
}
