//! Deterministic providers for unit tests.

use crate::index::VectorIndex;
use async_trait::async_trait;
use sift_core::{
    AnswerGenerator, Embedding, EmbeddingProvider, Error, GenerationOptions, Result,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Words the keyword embedder counts, one dimension each.
const VOCABULARY: &[&str] = &[
    "rust", "ownership", "borrowing", "python", "scripting", "cargo", "crates", "ocean",
    "whales", "tea", "plants", "lifetimes",
];

/// Counts vocabulary words so that texts sharing words score higher.
#[derive(Default)]
pub struct KeywordEmbedder {
    /// Number of `embed` and `embed_batch` calls made.
    pub calls: AtomicUsize,
}

impl KeywordEmbedder {
    /// Count vocabulary words in `text`.
    pub fn vector(text: &str) -> Embedding {
        let mut vector = vec![0.0; VOCABULARY.len()];
        for word in text
            .split(|character: char| !character.is_alphanumeric())
            .map(str::to_lowercase)
        {
            if let Some(slot) = VOCABULARY.iter().position(|known| *known == word) {
                vector[slot] += 1.0;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn model_name(&self) -> &str {
        "keyword-test"
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|text| Self::vector(text)).collect())
    }
}

/// Returns one vector fewer than requested.
pub struct ShortBatchEmbedder;

#[async_trait]
impl EmbeddingProvider for ShortBatchEmbedder {
    fn model_name(&self) -> &str {
        "short-batch"
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(KeywordEmbedder::vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts
            .iter()
            .skip(1)
            .map(|text| KeywordEmbedder::vector(text))
            .collect())
    }
}

/// Produces a NaN component in every vector.
pub struct NanEmbedder;

#[async_trait]
impl EmbeddingProvider for NanEmbedder {
    fn model_name(&self) -> &str {
        "nan-test"
    }

    async fn embed(&self, _text: &str) -> Result<Embedding> {
        Ok(vec![f32::NAN, 1.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(vec![vec![f32::NAN, 1.0]; texts.len()])
    }
}

/// Records prompts and answers with a fixed string.
#[derive(Default)]
pub struct RecordingGenerator {
    /// Every prompt received, oldest first.
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    /// The most recent prompt, if any.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok()?.last().cloned()
    }
}

#[async_trait]
impl AnswerGenerator for RecordingGenerator {
    fn model_name(&self) -> &str {
        "recording-test"
    }

    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String> {
        self.prompts
            .lock()
            .map_err(|_| Error::Other("prompt log poisoned".to_owned()))?
            .push(prompt.to_owned());
        Ok("generated answer".to_owned())
    }
}

/// Build an index holding `texts` embedded with `embedder`.
pub async fn keyword_index(embedder: &KeywordEmbedder, texts: &[&str]) -> VectorIndex {
    let texts: Vec<String> = texts.iter().map(|text| (*text).to_owned()).collect();
    let vectors = embedder.embed_batch(&texts).await.unwrap();
    let mut index = VectorIndex::new();
    index.add(vectors, texts, None).unwrap();
    index
}
