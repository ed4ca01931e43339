//! Error types for binvox file operations.

use thiserror::Error;

/// Errors that can occur while reading a binvox file.
#[derive(Error, Debug)]
pub enum BinvoxError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed header line.
    #[error("Header error at line {line}: {message}")]
    Header {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// Malformed voxel payload.
    #[error("Data error: {0}")]
    Data(String),

    /// Payload ended before the declared grid was filled.
    #[error("Truncated voxel data: expected {expected} cells, got {actual}")]
    Truncated {
        /// Cell count declared by the header.
        expected: usize,
        /// Cells actually decoded.
        actual: usize,
    },
}

impl BinvoxError {
    /// Create a header error.
    pub fn header(line: usize, message: impl Into<String>) -> Self {
        Self::Header {
            line,
            message: message.into(),
        }
    }

    /// Create a data error.
    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }
}
