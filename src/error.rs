//! Error types for catsave

use thiserror::Error;

/// Main error type for catsave operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A fixed-width read ran past the end of the buffer
    #[error("Out of bounds at offset {offset}: needed {needed} bytes, {available} available")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A guarded string read refused its length prefix.
    ///
    /// Only used inside `ByteCursor`; callers see `None` instead.
    #[error("Guarded read rejected at offset {offset} (declared length {length})")]
    GuardRejected { offset: usize, length: u64 },

    /// A layout table points outside the data it describes
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Decompression error: {0}")]
    Decompression(String),
}

/// Result type alias for catsave operations
pub type Result<T> = std::result::Result<T, Error>;
