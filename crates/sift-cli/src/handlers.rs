use anyhow::{Context as _, Result, bail};
use sift_context::{DocumentLoader, RagPipeline, build_splitter};
use sift_core::SiftConfig;
use sift_local::{embedder_from_config, generator_from_config};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::output;

/// Build the pipeline described by `config` and load its persisted index.
async fn open_pipeline(config: &SiftConfig) -> Result<RagPipeline> {
    let embedder = embedder_from_config(config)?;
    let generator = generator_from_config(config)?;
    let pipeline = RagPipeline::from_config(config, embedder, generator)?;
    pipeline
        .open_store()
        .await
        .with_context(|| format!("loading index {}", config.store.path.display()))?;
    Ok(pipeline)
}

/// Handle `sift index`
pub async fn handle_index(config: &SiftConfig, path: &Path, json: bool) -> Result<()> {
    let pipeline = open_pipeline(config).await?;
    pipeline.ensure_models().await?;

    info!("Indexing {}", path.display());
    let report = pipeline.index_path(path).await?;

    if json {
        output::print_json(&report)
    } else {
        output::print_report(&report, pipeline.store_path());
        Ok(())
    }
}

/// Handle `sift query`
pub async fn handle_query(
    config: &SiftConfig,
    question: &str,
    top_k: Option<usize>,
    include_sources: bool,
    json: bool,
) -> Result<()> {
    let pipeline = open_pipeline(config).await?;
    pipeline.ensure_models().await?;

    let top_k = top_k.unwrap_or(config.retrieval.top_k);
    let answer = pipeline.query(question, top_k, include_sources).await?;

    if json {
        output::print_json(&answer)
    } else {
        output::print_answer(&answer);
        Ok(())
    }
}

/// Handle `sift search`
pub async fn handle_search(
    config: &SiftConfig,
    question: &str,
    top_k: Option<usize>,
    json: bool,
) -> Result<()> {
    let pipeline = open_pipeline(config).await?;
    pipeline.ensure_models().await?;

    let top_k = top_k.unwrap_or(config.retrieval.top_k);
    let chunks = pipeline.retrieve(question, top_k).await?;

    if json {
        output::print_json(&chunks)
    } else {
        output::print_hits(&chunks);
        Ok(())
    }
}

/// Handle `sift chunk`
pub fn handle_chunk(config: &SiftConfig, file: &Path, json: bool) -> Result<()> {
    let document = DocumentLoader::new().load_file(file)?;
    let splitter = build_splitter(&config.chunking)?;
    let chunks = splitter.split(&document.content);

    if json {
        output::print_json(&chunks)
    } else {
        output::print_chunks(&chunks);
        Ok(())
    }
}

/// Handle `sift stats`
pub async fn handle_stats(config: &SiftConfig, json: bool) -> Result<()> {
    let pipeline = open_pipeline(config).await?;
    let stats = pipeline.stats().await;

    if json {
        output::print_json(&stats)
    } else {
        output::print_stats(&stats, pipeline.store_path());
        Ok(())
    }
}

/// Handle `sift init-config`
pub fn handle_init_config(target: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match target {
        Some(path) => path,
        None => SiftConfig::config_path()?,
    };
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    SiftConfig::default().save_to_file(&path)?;
    output::print_status(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}
