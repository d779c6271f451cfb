//! Query-time retrieval: embed the question and search the shared index.

use crate::index::VectorIndex;
use serde::Serialize;
use sift_core::{EmbeddingProvider, Metadata, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A chunk returned for a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    /// Chunk text
    pub content: String,
    /// Cosine similarity to the query
    pub score: f32,
    /// Metadata stored with the chunk
    pub metadata: Metadata,
}

/// Finds the chunks most similar to a query
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<RwLock<VectorIndex>>,
}

impl Retriever {
    /// Create a retriever over a shared index
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<RwLock<VectorIndex>>) -> Self {
        Self { embedder, index }
    }

    /// Return up to `top_k` chunks in descending similarity order
    ///
    /// The embedding provider is not called when the index is empty or
    /// `top_k` is zero.
    ///
    /// # Errors
    /// Returns the provider's error if embedding fails, or `DimensionMismatch`
    /// if the provider's vectors disagree with the index
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        if top_k == 0 || self.index.read().await.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(query).await?;
        let hits = self.index.read().await.search(&query_vector, top_k)?;
        debug!("Retrieved {} chunks for query", hits.len());

        Ok(hits
            .into_iter()
            .map(|hit| RetrievedChunk {
                content: hit.text,
                score: hit.score,
                metadata: hit.metadata,
            })
            .collect())
    }
}
