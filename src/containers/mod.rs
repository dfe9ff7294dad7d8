//! Per-format container probes. Each is a small local state machine over
//! its own vocabulary (ZIP filenames, EBML element ids, TIFF tags, ASF
//! GUIDs, ...) — deliberately not unified under one schema, since they
//! diverge too much to share one profitably.

pub mod asf;
pub mod ebml;
pub mod gzip;
pub mod isobmff;
pub mod jp2;
pub mod ogg;
pub mod png;
pub mod tar;
pub mod tiff;
pub mod zip;
