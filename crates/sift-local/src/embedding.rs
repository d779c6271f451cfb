//! Embeddings served by a local Ollama instance.

use async_trait::async_trait;
use core::fmt::Debug;
use ollama_rs::Ollama;
use ollama_rs::generation::embeddings::request::GenerateEmbeddingsRequest;
use reqwest::Url;
use sift_core::{Embedding, EmbeddingProvider, Error, Result};
use tokio::process::Command;
use tracing::{debug, info};

/// Ollama embedding client
pub struct OllamaEmbedder {
    ollama: Ollama,
    model: String,
}

impl OllamaEmbedder {
    /// Create a client for `model` at `host:port`
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `host` is not a valid URL
    #[allow(deprecated, reason = "ollama-rs 0.3.5 deprecated `Ollama::new`")]
    pub fn new(host: &str, port: u16, model: String) -> Result<Self> {
        let host = host.trim_end_matches('/');
        Url::parse(host).map_err(|err| {
            Error::InvalidConfiguration(format!("invalid Ollama host '{host}': {err}"))
        })?;
        Ok(Self {
            ollama: Ollama::new(host.to_owned(), port),
            model,
        })
    }

    fn map_embedding_error(&self, error: &impl Debug, action: &str) -> Error {
        let error_str = format!("{error:?}");
        if error_str.contains("model") && error_str.contains("not found") {
            Error::Provider(format!(
                "Embedding model '{}' not found. Run: ollama pull {}",
                self.model, self.model
            ))
        } else {
            Error::Provider(format!("{action} failed: {error_str}"))
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn ensure_model_available(&self) -> Result<()> {
        let models = self.ollama.list_local_models().await.map_err(|error| {
            Error::Provider(format!(
                "Failed to connect to Ollama: {error}.\n\nPlease ensure Ollama is installed and running:\n  - Install from: https://ollama.ai\n  - Start with: ollama serve"
            ))
        })?;

        if models.iter().any(|model| model.name.contains(&self.model)) {
            debug!("Embedding model '{}' is available", self.model);
            return Ok(());
        }

        info!("Embedding model '{}' not found, pulling it", self.model);
        info!("    Running: ollama pull {}", self.model);

        let status = Command::new("ollama")
            .args(["pull", &self.model])
            .status()
            .await
            .map_err(|error| {
                Error::Provider(format!(
                    "Failed to run 'ollama pull {}': {error}. Is Ollama installed?",
                    self.model
                ))
            })?;

        if !status.success() {
            return Err(Error::Provider(format!(
                "Failed to pull model '{}'. Check Ollama is running.",
                self.model
            )));
        }

        info!("Pulled embedding model '{}'", self.model);
        Ok(())
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        let request = GenerateEmbeddingsRequest::new(self.model.clone(), text.to_owned().into());

        let response = self
            .ollama
            .generate_embeddings(request)
            .await
            .map_err(|error| self.map_embedding_error(&error, "Embedding generation"))?;

        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::Provider("No embeddings returned".to_owned()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::default());
        }

        if let [text] = texts {
            return Ok(vec![self.embed(text).await?]);
        }

        let request = GenerateEmbeddingsRequest::new(self.model.clone(), texts.to_vec().into());

        let response = self
            .ollama
            .generate_embeddings(request)
            .await
            .map_err(|error| self.map_embedding_error(&error, "Batch embedding generation"))?;

        debug!("Embedded {} texts with '{}'", texts.len(), self.model);
        Ok(response.embeddings)
    }
}
