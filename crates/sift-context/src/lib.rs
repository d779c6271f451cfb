//! Retrieval building blocks: text splitting, an exact cosine vector index,
//! document loading and the pipeline that ties them to embedding and
//! generation backends.
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Test allows"
    )
)]

/// Recursive and fixed-size text splitters plus text helpers
pub mod chunking;
/// In-memory vector index with JSON snapshots
pub mod index;
/// Plain-text document loading
pub mod loader;
/// RAG pipeline orchestration
pub mod pipeline;
/// Prompt assembly
pub mod prompt;
/// Query-time retrieval
pub mod retriever;
#[cfg(test)]
mod testing;

pub use chunking::{
    FixedSizeSplitter, RecursiveSplitter, SplitterConfig, TextSplitter, build_splitter,
};
pub use index::{IndexEntry, SearchHit, VectorIndex, cosine_similarity};
pub use loader::DocumentLoader;
pub use pipeline::{Answer, IndexReport, PipelineStats, RagPipeline, SourceSnippet};
pub use prompt::{DEFAULT_SYSTEM_PROMPT, build_prompt};
pub use retriever::{RetrievedChunk, Retriever};
