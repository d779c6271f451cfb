use async_trait::async_trait;

use crate::{Embedding, GenerationOptions, Result};

/// Trait for backends that turn text into fixed-dimension vectors.
///
/// A provider instance must always return vectors of the same length.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier used by this provider.
    fn model_name(&self) -> &str;

    /// Ensure the embedding model is available.
    ///
    /// # Errors
    /// Returns an error if the model is not available or cannot be loaded
    async fn ensure_model_available(&self) -> Result<()> {
        Ok(())
    }

    /// Generate embedding for text
    ///
    /// # Errors
    /// Returns an error if embedding generation fails
    async fn embed(&self, text: &str) -> Result<Embedding>;

    /// Embed multiple texts in one call, preserving order.
    ///
    /// # Errors
    /// Returns an error if any embedding generation fails
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;
}

/// Trait for language model backends that produce answers from a prompt.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Returns the model identifier used by this generator.
    fn model_name(&self) -> &str;

    /// Generates text for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or the request fails.
    /// Failures are surfaced to the caller, never retried here.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;
}
