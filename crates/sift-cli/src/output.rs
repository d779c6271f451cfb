//! Printing results to stdout.
#![allow(clippy::print_stdout, reason = "CLI output goes to stdout")]

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use sift_context::{Answer, IndexReport, PipelineStats, RetrievedChunk};
use sift_core::Metadata;
use sift_context::chunking::truncate_preview;
use std::path::Path;

/// Characters of chunk text shown per search hit.
const HIT_PREVIEW_CHARS: usize = 120;

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn source_label(metadata: &Metadata) -> &str {
    metadata
        .get("source")
        .and_then(Value::as_str)
        .unwrap_or("<text>")
}

/// Print the outcome of an indexing run
pub fn print_report(report: &IndexReport, store: Option<&Path>) {
    println!(
        "Indexed {} chunks from {} documents",
        report.chunks, report.documents
    );
    if let Some(path) = store {
        println!("Saved index to {}", path.display());
    }
}

/// Print an answer followed by its sources
pub fn print_answer(answer: &Answer) {
    println!("{}", answer.answer);

    let Some(sources) = &answer.sources else {
        return;
    };
    if sources.is_empty() {
        return;
    }
    println!();
    println!("Sources:");
    for (index, source) in sources.iter().enumerate() {
        println!(
            "  [{}] {} (score {:.3})",
            index + 1,
            source_label(&source.metadata),
            source.score
        );
        println!("      {}", source.content);
    }
}

/// Print retrieval hits, best first
pub fn print_hits(chunks: &[RetrievedChunk]) {
    if chunks.is_empty() {
        println!("No matching chunks");
        return;
    }
    for (index, chunk) in chunks.iter().enumerate() {
        let preview = truncate_preview(&chunk.content.replace('\n', " "), HIT_PREVIEW_CHARS);
        println!(
            "{:>2}. {:.3}  {}",
            index + 1,
            chunk.score,
            source_label(&chunk.metadata)
        );
        println!("    {preview}");
    }
}

/// Print the chunks produced for a file
pub fn print_chunks(chunks: &[String]) {
    for (index, chunk) in chunks.iter().enumerate() {
        println!("--- chunk {} ({} chars) ---", index + 1, chunk.chars().count());
        println!("{chunk}");
    }
    println!("{} chunks", chunks.len());
}

/// Print index statistics
pub fn print_stats(stats: &PipelineStats, store: Option<&Path>) {
    println!("Entries:         {}", stats.entries);
    match stats.dimension {
        Some(dimension) => println!("Dimension:       {dimension}"),
        None => println!("Dimension:       (not set)"),
    }
    println!("Embedding model: {}", stats.embedding_model);
    println!("LLM model:       {}", stats.llm_model);
    if let Some(path) = store {
        println!("Store:           {}", path.display());
    }
}

/// Print a one-line status message
pub fn print_status(message: &str) {
    println!("{message}");
}
