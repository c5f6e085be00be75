//! Error types for the HashFS library

use std::io;
use thiserror::Error;

/// Result type alias for HashFS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for HashFS operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid HashFS format or corrupted archive
    #[error("Invalid HashFS format: {0}")]
    InvalidFormat(String),

    /// Unsupported HashFS version
    #[error("Unsupported HashFS version: {0}")]
    UnsupportedVersion(u16),

    /// Compression/decompression error
    #[error("Compression error: {0}")]
    Compression(String),

    /// Catalog record did not serialize to its fixed size
    #[error("Catalog record serialized to {actual} bytes, expected exactly {expected}")]
    RecordSize {
        /// The required record size
        expected: usize,
        /// The size actually produced
        actual: usize,
    },

    /// Entry not found in archive
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Decompressed payload length disagrees with the catalog record
    #[error("Size mismatch for {name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Entry name or hash
        name: String,
        /// Uncompressed size recorded in the catalog
        expected: u64,
        /// Size actually produced
        actual: u64,
    },
}

impl Error {
    /// Create a new InvalidFormat error
    pub fn invalid_format<S: Into<String>>(msg: S) -> Self {
        Error::InvalidFormat(msg.into())
    }

    /// Create a new Compression error
    pub fn compression<S: Into<String>>(msg: S) -> Self {
        Error::Compression(msg.into())
    }

    /// Check if this error indicates the archive is corrupted
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::InvalidFormat(_) | Error::RecordSize { .. } | Error::SizeMismatch { .. }
        )
    }
}
