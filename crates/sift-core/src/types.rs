use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A single embedding vector.
pub type Embedding = Vec<f32>;

/// Free-form metadata attached to documents and index entries.
pub type Metadata = Map<String, Value>;

/// Raw text loaded from some source, before splitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Full text content.
    pub content: String,
    /// Where the text came from.
    pub source: PathBuf,
    /// Descriptive metadata (`source`, `file_name`, `file_type`).
    pub metadata: Metadata,
}

impl Document {
    /// Create a document with empty metadata.
    pub fn new<T: Into<String>>(content: T, source: PathBuf) -> Self {
        Self {
            content: content.into(),
            source,
            metadata: Metadata::new(),
        }
    }

    /// Attach metadata, replacing any existing entries.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Sampling parameters passed to an answer generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of tokens to generate.
    pub max_tokens: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}
