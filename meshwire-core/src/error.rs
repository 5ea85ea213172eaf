//! Error types for meshwire

use thiserror::Error;

/// Main error type for meshwire operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for meshwire operations
pub type Result<T> = std::result::Result<T, Error>;
