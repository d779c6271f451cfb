//! End-to-end retrieval-augmented generation: index documents, answer questions.

use crate::chunking::{TextSplitter, build_splitter, clean_text, truncate_preview};
use crate::index::VectorIndex;
use crate::loader::DocumentLoader;
use crate::prompt::build_prompt;
use crate::retriever::{RetrievedChunk, Retriever};
use serde::Serialize;
use serde_json::Value;
use sift_core::{
    AnswerGenerator, Document, EmbeddingProvider, Error, GenerationOptions, Metadata, Result,
    SiftConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Answer returned when retrieval finds nothing.
pub const NO_CONTEXT_ANSWER: &str =
    "I don't have any relevant information to answer that question.";

/// Maximum characters of chunk text shown per source.
pub const SOURCE_PREVIEW_CHARS: usize = 200;

/// Counts from an indexing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    /// Documents that produced at least one chunk
    pub documents: usize,
    /// Chunks appended to the index
    pub chunks: usize,
}

/// A retrieved chunk as shown alongside an answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSnippet {
    /// Whitespace-normalised preview of the chunk text
    pub content: String,
    /// Cosine similarity to the question
    pub score: f32,
    /// Metadata stored with the chunk
    pub metadata: Metadata,
}

/// Generated answer with optional supporting sources
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Answer text
    pub answer: String,
    /// Supporting chunks, present when requested
    pub sources: Option<Vec<SourceSnippet>>,
}

/// Pipeline statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Stored chunks
    pub entries: usize,
    /// Established vector dimension
    pub dimension: Option<usize>,
    /// Embedding model identifier
    pub embedding_model: String,
    /// Answer model identifier
    pub llm_model: String,
}

/// Loader, splitter, providers and a shared vector index wired together
///
/// Indexing takes the index write lock once per document; queries only
/// take read locks, so concurrent queries do not block each other.
pub struct RagPipeline {
    loader: DocumentLoader,
    splitter: Box<dyn TextSplitter>,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn AnswerGenerator>,
    index: Arc<RwLock<VectorIndex>>,
    retriever: Retriever,
    store_path: Option<PathBuf>,
    system_prompt: Option<String>,
    options: GenerationOptions,
}

impl RagPipeline {
    /// Create a pipeline with an empty index and no store path
    pub fn new(
        splitter: Box<dyn TextSplitter>,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        let index = Arc::new(RwLock::new(VectorIndex::new()));
        let retriever = Retriever::new(Arc::clone(&embedder), Arc::clone(&index));
        Self {
            loader: DocumentLoader::new(),
            splitter,
            embedder,
            generator,
            index,
            retriever,
            store_path: None,
            system_prompt: None,
            options: GenerationOptions::default(),
        }
    }

    /// Create a pipeline from configuration and already-built providers
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the chunking section is invalid
    pub fn from_config(
        config: &SiftConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Result<Self> {
        let splitter = build_splitter(&config.chunking)?;
        let mut pipeline = Self::new(splitter, embedder, generator)
            .with_store_path(config.store.path.clone())
            .with_generation_options(config.generation.options());
        pipeline.system_prompt = config.generation.system_prompt.clone();
        Ok(pipeline)
    }

    /// Persist the index at `path` after indexing and on [`RagPipeline::save`]
    #[must_use]
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store_path = Some(path);
        self
    }

    /// Replace the default system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = Some(prompt);
        self
    }

    /// Sampling options passed to the generator
    #[must_use]
    pub fn with_generation_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Configured store path
    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    /// Shared handle to the underlying index
    pub fn index(&self) -> Arc<RwLock<VectorIndex>> {
        Arc::clone(&self.index)
    }

    /// Ask the embedding backend to make its model available
    ///
    /// # Errors
    /// Returns the provider's error
    pub async fn ensure_models(&self) -> Result<()> {
        self.embedder.ensure_model_available().await
    }

    /// Load the persisted index, if one exists at the store path
    ///
    /// A missing file leaves the index empty.
    ///
    /// # Errors
    /// Returns `CorruptData` or `Io` if the snapshot exists but cannot be read
    pub async fn open_store(&self) -> Result<()> {
        let Some(path) = &self.store_path else {
            return Ok(());
        };
        match self.index.write().await.load(path) {
            Ok(()) => Ok(()),
            Err(Error::NotFound(_)) => {
                info!("No existing index at {}, starting empty", path.display());
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Load, split, embed and store every document at `path`
    ///
    /// Each document's chunks are appended in one step. The index is saved
    /// afterwards when a store path is configured.
    ///
    /// # Errors
    /// - loader errors (`NotFound`, `UnsupportedFormat`, `Io`)
    /// - `Provider` if embedding fails or returns the wrong number of vectors
    /// - `DimensionMismatch` if the provider disagrees with the index
    pub async fn index_path(&self, path: &Path) -> Result<IndexReport> {
        let documents = self.loader.load(path)?;
        info!("Loaded {} documents from {}", documents.len(), path.display());

        let mut report = IndexReport::default();
        for document in documents {
            let chunks = self.index_document(document).await?;
            if chunks > 0 {
                report.documents += 1;
                report.chunks += chunks;
            }
        }

        self.save().await?;
        info!(
            "Indexed {} chunks from {} documents",
            report.chunks, report.documents
        );
        Ok(report)
    }

    /// Split, embed and store raw text with the given metadata
    ///
    /// # Errors
    /// Same as [`RagPipeline::index_path`], minus loader errors
    pub async fn index_text(&self, text: &str, metadata: Metadata) -> Result<IndexReport> {
        let document = Document::new(text, PathBuf::new()).with_metadata(metadata);
        let chunks = self.index_document(document).await?;
        self.save().await?;
        Ok(IndexReport {
            documents: usize::from(chunks > 0),
            chunks,
        })
    }

    async fn index_document(&self, document: Document) -> Result<usize> {
        let chunks = self.splitter.split(&document.content);
        if chunks.is_empty() {
            debug!("No chunks produced for {}", document.source.display());
            return Ok(0);
        }

        let vectors = self.embedder.embed_batch(&chunks).await?;
        if vectors.len() != chunks.len() {
            return Err(Error::Provider(format!(
                "embedding backend returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let metadata: Vec<Metadata> = (0..chunks.len())
            .map(|chunk_index| {
                let mut metadata = document.metadata.clone();
                metadata.insert("chunk_index".to_owned(), Value::from(chunk_index));
                metadata
            })
            .collect();

        let count = chunks.len();
        self.index.write().await.add(vectors, chunks, Some(metadata))?;
        debug!("Indexed {count} chunks from {}", document.source.display());
        Ok(count)
    }

    /// Retrieve the `top_k` chunks most similar to `question`
    ///
    /// # Errors
    /// Returns the provider's error or `DimensionMismatch`
    pub async fn retrieve(&self, question: &str, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        self.retriever.retrieve(question, top_k).await
    }

    /// Answer `question` from the `top_k` most similar chunks
    ///
    /// When nothing is retrieved the generator is not called and a fixed
    /// answer is returned.
    ///
    /// # Errors
    /// Returns retrieval or generation errors
    pub async fn query(&self, question: &str, top_k: usize, include_sources: bool) -> Result<Answer> {
        let retrieved = self.retrieve(question, top_k).await?;

        if retrieved.is_empty() {
            return Ok(Answer {
                answer: NO_CONTEXT_ANSWER.to_owned(),
                sources: include_sources.then(Vec::new),
            });
        }

        let contexts: Vec<String> = retrieved.iter().map(|chunk| chunk.content.clone()).collect();
        let prompt = build_prompt(question, &contexts, self.system_prompt.as_deref());
        let answer = self.generator.generate(&prompt, &self.options).await?;

        let sources = include_sources.then(|| {
            retrieved
                .into_iter()
                .map(|chunk| SourceSnippet {
                    content: truncate_preview(&clean_text(&chunk.content), SOURCE_PREVIEW_CHARS),
                    score: chunk.score,
                    metadata: chunk.metadata,
                })
                .collect()
        });

        Ok(Answer { answer, sources })
    }

    /// Current index size and model identifiers
    pub async fn stats(&self) -> PipelineStats {
        let index = self.index.read().await;
        PipelineStats {
            entries: index.len(),
            dimension: index.dimension(),
            embedding_model: self.embedder.model_name().to_owned(),
            llm_model: self.generator.model_name().to_owned(),
        }
    }

    /// Persist the index to the store path, if configured
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be written
    pub async fn save(&self) -> Result<()> {
        match &self.store_path {
            Some(path) => self.index.read().await.save(path),
            None => Ok(()),
        }
    }
}
