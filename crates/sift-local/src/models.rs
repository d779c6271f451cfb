use serde::{Deserialize, Serialize};

/// Sampling options understood by Ollama
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OllamaOptions {
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub num_predict: usize,
}

/// Ollama API request for generation
#[derive(Debug, Serialize)]
pub struct OllamaGenerateRequest {
    /// Model to use for generation.
    pub model: String,
    /// Input prompt for the model.
    pub prompt: String,
    /// Whether to stream the response.
    pub stream: bool,
    /// Sampling options.
    pub options: OllamaOptions,
}

/// Ollama API response for generation
#[derive(Debug, Deserialize)]
pub struct OllamaGenerateResponse {
    /// Model that generated the response.
    #[serde(default)]
    pub model: String,
    /// Generated text content.
    pub response: String,
    /// Whether generation is complete.
    #[serde(default)]
    pub done: bool,
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_eval_count: usize,
    /// Number of tokens generated.
    #[serde(default)]
    pub eval_count: usize,
}
