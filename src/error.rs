//! Error types for textwire.

use thiserror::Error;

/// Main error type for all textwire operations.
#[derive(Debug, Error)]
pub enum TextwireError {
    /// I/O error during a stream read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Separator string was empty at parser construction.
    #[error("separator must not be empty")]
    EmptySeparator,

    /// Read buffer size was zero at reader construction.
    #[error("buffer size must be at least 1, got {0}")]
    InvalidBufferSize(usize),

    /// The TCP stream has no peer (not connected).
    #[error("stream is not connected")]
    NotConnected,
}

/// Result type alias using TextwireError.
pub type Result<T> = std::result::Result<T, TextwireError>;
