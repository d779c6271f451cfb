//! Core types and traits for the sift retrieval pipeline.
//!
//! This crate provides the error taxonomy, shared data types, configuration
//! and the capability traits that embedding and generation backends implement.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Test allows"
    )
)]

/// Configuration loading, validation and environment overrides.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Capability traits for embedding and answer generation backends.
pub mod traits;
/// Core data types shared across crates.
pub mod types;

pub use config::SiftConfig;
pub use error::{Error, Result};
pub use traits::{AnswerGenerator, EmbeddingProvider};
pub use types::{Document, Embedding, GenerationOptions, Metadata};
