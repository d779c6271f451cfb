//! Deterministic providers that need no model server.

use async_trait::async_trait;
use sift_core::{AnswerGenerator, Embedding, EmbeddingProvider, Error, GenerationOptions, Result};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash as _, Hasher as _};

/// Number of prompt characters quoted by [`EchoGenerator`].
const ECHO_PREFIX_CHARS: usize = 50;

/// Hash-seeded bag-of-words embeddings
///
/// Each lowercase word is hashed into one of `dimension` buckets with a
/// hash-derived sign, and the result is L2-normalised. Texts sharing words
/// therefore score higher than unrelated ones, which is enough for offline
/// indexing and tests.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
    model_name: String,
}

impl HashEmbedder {
    /// Create an embedder producing `dimension`-component vectors
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `dimension` is zero
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidConfiguration(
                "hash embedding dimension must be positive".to_owned(),
            ));
        }
        Ok(Self {
            dimension,
            model_name: format!("hash-{dimension}"),
        })
    }

    /// Vector length produced by this embedder
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_text(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0f32; self.dimension];
        for word in text
            .split(|character: char| !character.is_alphanumeric())
            .filter(|word| !word.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            let hash = hasher.finish();

            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

/// Generator that answers with the head of the prompt
#[derive(Debug, Clone, Default)]
pub struct EchoGenerator;

#[async_trait]
impl AnswerGenerator for EchoGenerator {
    fn model_name(&self) -> &str {
        "echo"
    }

    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String> {
        let head: String = prompt.chars().take(ECHO_PREFIX_CHARS).collect();
        Ok(format!("Dummy response to: {head}..."))
    }
}
