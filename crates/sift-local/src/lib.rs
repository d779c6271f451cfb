//! Embedding and answer-generation backends for sift.
//!
//! Ollama-backed providers talk to a local model server; the offline
//! providers are deterministic and need nothing beyond this crate.
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

/// Ollama embedding client
pub mod embedding;
/// Ollama answer generation
pub mod inference;
/// Ollama wire models
pub mod models;
/// Deterministic offline providers
pub mod offline;

pub use embedding::OllamaEmbedder;
pub use inference::OllamaGenerator;
pub use offline::{EchoGenerator, HashEmbedder};

use sift_core::config::{EmbeddingBackend, GenerationBackend};
use reqwest::Url;
use sift_core::{AnswerGenerator, EmbeddingProvider, Error, Result, SiftConfig};
use std::sync::Arc;
use tracing::debug;

/// Build the embedding provider selected by the configuration
///
/// # Errors
/// Returns `InvalidConfiguration` if the selected backend cannot be constructed
pub fn embedder_from_config(config: &SiftConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let embedding = &config.embedding;
    debug!("Using {:?} embedding backend", embedding.backend);
    Ok(match embedding.backend {
        EmbeddingBackend::Ollama => Arc::new(OllamaEmbedder::new(
            &config.ollama.host,
            config.ollama.port,
            embedding.model.clone(),
        )?),
        EmbeddingBackend::Hash => Arc::new(HashEmbedder::new(embedding.dimension)?),
    })
}

/// Build the answer generator selected by the configuration
///
/// # Errors
/// Returns `InvalidConfiguration` if the Ollama base URL is invalid
pub fn generator_from_config(config: &SiftConfig) -> Result<Arc<dyn AnswerGenerator>> {
    let generation = &config.generation;
    debug!("Using {:?} generation backend", generation.backend);
    Ok(match generation.backend {
        GenerationBackend::Ollama => {
            let base_url = config.ollama.base_url();
            Url::parse(&base_url).map_err(|err| {
                Error::InvalidConfiguration(format!("invalid Ollama URL '{base_url}': {err}"))
            })?;
            Arc::new(OllamaGenerator::new(generation.model.clone()).with_url(base_url))
        }
        GenerationBackend::Echo => Arc::new(EchoGenerator),
    })
}
