//! Error types for the LWO reader.

use std::path::PathBuf;
use thiserror::Error;

use crate::iff::Tag;

/// Main error type for LWO decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Leading container tag is not FORM
    #[error("Invalid IFF container: expected FORM, found {0}")]
    InvalidMagic(Tag),

    /// Container size field disagrees with the source length
    #[error("Container size mismatch: header declares {declared} bytes, source holds {expected}")]
    SizeMismatch { declared: u64, expected: u64 },

    /// File-type tag is not one of LWO2, LWOB or LWLO
    #[error("Unsupported LightWave file type: {0}")]
    UnsupportedFileType(Tag),

    /// A read went past the end of a chunk, sub-chunk or the source
    #[error("Unexpected end of data at position {0}")]
    UnexpectedEof(u64),

    /// A top-level chunk declares more bytes than remain in the source
    #[error("Chunk {tag} at offset {offset} declares {declared} bytes but only {remaining} remain")]
    Truncated { tag: Tag, offset: u64, declared: u64, remaining: u64 },

    /// A chunk refers to an earlier record that was never declared
    #[error("Chunk {chunk} requires a preceding {requires} chunk")]
    MissingContext { chunk: Tag, requires: Tag },

    /// Polygon list sub-type outside FACE/CURV/PTCH/MBAL/BONE
    #[error("Unknown polygon type: {0}")]
    UnknownPolygonType(Tag),

    /// Invalid data structure in file
    #[error("Invalid file structure: {0}")]
    InvalidStructure(String),

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// True for errors raised while reading past a declared boundary.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::UnexpectedEof(_) | Self::Truncated { .. })
    }
}

/// Result type alias for LWO operations.
pub type Result<T> = std::result::Result<T, Error>;
