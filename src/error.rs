//! Error kinds produced by the detection engine.
//!
//! A closed enum rather than a bare `Result<T, String>`, so callers can
//! distinguish "ran out of bytes" from "cancelled" from "the underlying
//! source is broken".

use thiserror::Error;

/// Errors raised while tokenizing a byte source or probing a container format.
#[derive(Debug, Error)]
pub enum SniffError {
    /// A read or skip required more bytes than the source could provide.
    #[error("unexpected end of source")]
    EndOfSource,

    /// The caller's cancellation signal fired during an I/O operation.
    #[error("detection aborted")]
    Aborted,

    /// A structured field (chunk length, element length, ...) contradicted
    /// the bytes around it. Callers should treat this as "unknown", not as
    /// a hard failure, unless it surfaces from the tokenizer itself.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An argument to a buffer-based constructor was not a valid contiguous
    /// byte region.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O error from the underlying source that isn't end-of-source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SniffError>;
