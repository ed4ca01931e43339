//! Error types for STEP file export.

use thiserror::Error;

/// Errors that can occur during STEP export.
#[derive(Error, Debug)]
pub enum StepError {
    /// I/O error writing the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Application protocol string not one of AP203, AP214IS, AP242DIS.
    #[error("Unknown application protocol: {0}")]
    UnknownProtocol(String),
}
