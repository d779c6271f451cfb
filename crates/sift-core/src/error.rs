use core::result::Result as CoreResult;
use std::io::Error as IoError;

use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for sift operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// An HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Splitter, index or configuration parameters are invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A vector's length disagrees with the index dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension established by the index.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },

    /// A vector holds a NaN or infinite component.
    #[error("Non-finite vector component in batch position {position}")]
    NonFiniteVector {
        /// Position of the offending vector within its batch.
        position: usize,
    },

    /// Parallel input sequences have different lengths.
    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    /// The requested file or directory does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A persisted snapshot does not match the expected schema.
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// The document loader has no reader for this file type.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// An embedding or generation backend failed.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A general error not covered by other variants.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Determines whether this error may succeed if retried.
    ///
    /// Returns `true` for transient errors like network failures or provider errors.
    /// Nothing in sift retries automatically; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Provider(_))
    }
}
