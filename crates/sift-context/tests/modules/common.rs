//! Shared fakes for integration tests.

use async_trait::async_trait;
use sift_core::{AnswerGenerator, Embedding, EmbeddingProvider, GenerationOptions, Result};

/// Letter-frequency embedding: texts with similar letters score close.
pub struct LetterEmbedder;

impl LetterEmbedder {
    pub fn vector(text: &str) -> Embedding {
        let mut vector = vec![0.0; 26];
        for character in text.chars().filter(char::is_ascii_alphabetic) {
            let slot = (character.to_ascii_lowercase() as u8 - b'a') as usize;
            vector[slot] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for LetterEmbedder {
    fn model_name(&self) -> &str {
        "letters"
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts.iter().map(|text| Self::vector(text)).collect())
    }
}

/// Answers with the number of context documents in the prompt.
pub struct CountingGenerator;

#[async_trait]
impl AnswerGenerator for CountingGenerator {
    fn model_name(&self) -> &str {
        "counter"
    }

    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String> {
        Ok(format!("{} documents", prompt.matches("Document ").count()))
    }
}
