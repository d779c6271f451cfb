use async_trait::async_trait;
use reqwest::Client;
use sift_core::{AnswerGenerator, Error, GenerationOptions, Result};
use tracing::debug;

use crate::models::{OllamaGenerateRequest, OllamaGenerateResponse, OllamaOptions};

/// Answer generator backed by Ollama's `/api/generate`
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model_name: String,
}

impl OllamaGenerator {
    /// Create a generator talking to `http://localhost:11434`
    #[must_use]
    pub fn new(model_name: String) -> Self {
        Self {
            client: Client::new(),
            base_url: "http://localhost:11434".to_owned(),
            model_name,
        }
    }

    /// Use a different Ollama base URL
    #[must_use]
    pub fn with_url(mut self, url: String) -> Self {
        url.trim_end_matches('/').clone_into(&mut self.base_url);
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnswerGenerator for OllamaGenerator {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let request = OllamaGenerateRequest {
            model: self.model_name.clone(),
            prompt: prompt.to_owned(),
            stream: false,
            options: OllamaOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Ollama returned {status} for model '{}': {}",
                self.model_name,
                body.trim()
            )));
        }

        let ollama_response: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|err| Error::Provider(format!("Failed to parse Ollama response: {err}")))?;

        debug!(
            "Ollama generated {} tokens from {} prompt tokens",
            ollama_response.eval_count, ollama_response.prompt_eval_count
        );
        Ok(ollama_response.response)
    }
}
