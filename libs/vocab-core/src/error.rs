//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in the core library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("quality must be in 0..=5, got {value}")]
    InvalidQuality { value: u8 },
}
