use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Error, GenerationOptions, Result};

const ENV_EMBEDDING_MODEL: &str = "SIFT_EMBEDDING_MODEL";
const ENV_LLM_MODEL: &str = "SIFT_LLM_MODEL";
const ENV_STORE_PATH: &str = "SIFT_STORE_PATH";
const ENV_OLLAMA_HOST: &str = "OLLAMA_HOST";

/// Complete sift configuration.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    /// Text splitting parameters
    pub chunking: ChunkingConfig,
    /// Embedding backend selection
    pub embedding: EmbeddingConfig,
    /// Answer generation backend selection
    pub generation: GenerationConfig,
    /// Shared Ollama endpoint
    pub ollama: OllamaConfig,
    /// Vector index persistence
    pub store: StoreConfig,
    /// Retrieval defaults
    pub retrieval: RetrievalConfig,
    /// Log level and optional log file
    pub logging: LoggingConfig,
}

/// Which splitter to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingStrategy {
    /// Coarse-to-fine separator cascade with overlap.
    #[default]
    Recursive,
    /// Plain sliding character window.
    Fixed,
}

/// Text splitting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Splitting strategy
    pub strategy: ChunkingStrategy,
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between adjacent chunks in characters
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            strategy: ChunkingStrategy::Recursive,
            chunk_size: 1000,
            overlap: 100,
        }
    }
}

/// Embedding backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Ollama embedding endpoint.
    #[default]
    Ollama,
    /// Deterministic offline hash embeddings.
    Hash,
}

/// Embedding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Backend to use
    pub backend: EmbeddingBackend,
    /// Embedding model name
    pub model: String,
    /// Vector dimension produced by the hash backend
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Ollama,
            model: "nomic-embed-text".to_owned(),
            dimension: 384,
        }
    }
}

/// Answer generation backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationBackend {
    /// Ollama `/api/generate`.
    #[default]
    Ollama,
    /// Offline generator that echoes the prompt head.
    Echo,
}

/// Answer generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Backend to use
    pub backend: GenerationBackend,
    /// Language model name
    pub model: String,
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Replacement for the built-in system prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let options = GenerationOptions::default();
        Self {
            backend: GenerationBackend::Ollama,
            model: "qwen2.5:7b-instruct".to_owned(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            system_prompt: None,
        }
    }
}

impl GenerationConfig {
    /// Sampling options derived from this configuration.
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Ollama endpoint shared by the embedding and generation backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL without port
    pub host: String,
    /// Port of the Ollama service
    pub port: u16,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".to_owned(),
            port: 11434,
        }
    }
}

impl OllamaConfig {
    /// Full base URL, e.g. `http://localhost:11434`.
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }

    /// Apply an `OLLAMA_HOST`-style value (`host`, `host:port` or `scheme://host:port`).
    fn apply_host(&mut self, value: &str) {
        let value = value.trim().trim_end_matches('/');
        let with_scheme = if value.contains("://") {
            value.to_owned()
        } else {
            format!("http://{value}")
        };

        match with_scheme.rsplit_once(':') {
            Some((host, port)) if !port.starts_with("//") => {
                if let Ok(parsed) = port.parse::<u16>() {
                    host.clone_into(&mut self.host);
                    self.port = parsed;
                } else {
                    self.host = with_scheme;
                }
            }
            _ => self.host = with_scheme,
        }
    }
}

/// Vector index persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Snapshot file location
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".sift/index.json"),
        }
    }
}

/// Retrieval configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks handed to the generator
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Optional log file (written without ANSI colours)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

impl SiftConfig {
    /// Get the default config directory path (`~/.sift`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Other("Could not determine home directory".to_owned()))?;
        Ok(home.join(".sift"))
    }

    /// Get the default config file path (`~/.sift/config.toml`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location (`~/.sift/config.toml`)
    /// If the config doesn't exist, creates it with default values
    ///
    /// # Errors
    /// Returns an error if the config cannot be read or created
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            let config = Self::default();
            config.save_to_file(&config_path)?;
            Ok(config)
        }
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns `NotFound` if the file is missing, or an error if it cannot be parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
            _ => Error::Io(error),
        })?;
        let config: Self = toml::from_str(&contents)?;

        tracing::debug!(
            "Loaded config from {}: strategy={:?}, embedding={:?}/{}, generation={:?}/{}",
            path.display(),
            config.chunking.strategy,
            config.embedding.backend,
            config.embedding.model,
            config.generation.backend,
            config.generation.model
        );

        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|error| {
            Error::InvalidConfiguration(format!("Failed to serialize config: {error}"))
        })?;

        let header = "# sift configuration file\n\
                      # This file is automatically generated on first run\n\
                      # Edit this file to customize your settings\n\n";

        fs::write(path, format!("{header}{contents}"))?;

        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_process_env(&mut self) {
        self.apply_env_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides using the given variable lookup.
    ///
    /// Recognised variables: `SIFT_EMBEDDING_MODEL`, `SIFT_LLM_MODEL`,
    /// `SIFT_STORE_PATH` and `OLLAMA_HOST`. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup_set = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(model) = lookup_set(ENV_EMBEDDING_MODEL) {
            self.embedding.model = model;
        }
        if let Some(model) = lookup_set(ENV_LLM_MODEL) {
            self.generation.model = model;
        }
        if let Some(path) = lookup_set(ENV_STORE_PATH) {
            self.store.path = PathBuf::from(path);
        }
        if let Some(host) = lookup_set(ENV_OLLAMA_HOST) {
            self.ollama.apply_host(&host);
        }
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` describing the first offending value
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::InvalidConfiguration(
                "chunking.chunk_size must be positive".to_owned(),
            ));
        }
        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(Error::InvalidConfiguration(format!(
                "chunking.overlap ({}) must be less than chunking.chunk_size ({})",
                self.chunking.overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::InvalidConfiguration(
                "retrieval.top_k must be positive".to_owned(),
            ));
        }
        if self.embedding.backend == EmbeddingBackend::Hash && self.embedding.dimension == 0 {
            return Err(Error::InvalidConfiguration(
                "embedding.dimension must be positive for the hash backend".to_owned(),
            ));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(Error::InvalidConfiguration(format!(
                "generation.temperature ({}) must be within 0.0..=2.0",
                self.generation.temperature
            )));
        }
        if self.generation.max_tokens == 0 {
            return Err(Error::InvalidConfiguration(
                "generation.max_tokens must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}
