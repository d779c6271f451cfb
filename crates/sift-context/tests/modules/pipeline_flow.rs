//! Indexing a directory and answering questions through the public API.

#[cfg(test)]
mod tests {
    use crate::common::{CountingGenerator, LetterEmbedder};
    use sift_context::{RagPipeline, RecursiveSplitter, SplitterConfig};
    use sift_core::config::{ChunkingStrategy, SiftConfig};
    use sift_core::Metadata;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn write_corpus(root: &Path) {
        fs::create_dir_all(root.join("guides")).unwrap();
        fs::write(
            root.join("guides").join("zebra.md"),
            "Zebras graze on grass.\n\nZebra stripes are unique.",
        )
        .unwrap();
        fs::write(root.join("apples.txt"), "Apples are crisp and sweet.").unwrap();
        fs::write(root.join("ignored.json"), "{}").unwrap();
    }

    #[tokio::test]
    async fn test_index_directory_then_query() {
        let temp_dir = TempDir::new().unwrap();
        write_corpus(temp_dir.path());
        let store = temp_dir.path().join(".sift").join("index.json");

        let pipeline = RagPipeline::new(
            Box::new(RecursiveSplitter::new(SplitterConfig::new(40, 5).unwrap())),
            Arc::new(LetterEmbedder),
            Arc::new(CountingGenerator),
        )
        .with_store_path(store.clone());
        pipeline.open_store().await.unwrap();

        let report = pipeline.index_path(temp_dir.path()).await.unwrap();
        assert_eq!(report.documents, 2);
        assert!(report.chunks >= 2);
        assert!(store.exists());

        let answer = pipeline.query("zebra stripes", 2, true).await.unwrap();
        assert_eq!(answer.answer, "2 documents");
        let sources = answer.sources.unwrap();
        assert_eq!(sources.len(), 2);
        assert!(sources[0].score >= sources[1].score);
        for source in &sources {
            assert!(source.metadata.contains_key("chunk_index"));
            assert!(source.metadata.contains_key("source"));
        }

        let stats = pipeline.stats().await;
        assert_eq!(stats.entries, report.chunks);
        assert_eq!(stats.dimension, Some(26));
        assert_eq!(stats.embedding_model, "letters");
        assert_eq!(stats.llm_model, "counter");
    }

    #[tokio::test]
    async fn test_pipeline_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = SiftConfig::default();
        config.chunking.strategy = ChunkingStrategy::Fixed;
        config.chunking.chunk_size = 10;
        config.chunking.overlap = 2;
        config.store.path = temp_dir.path().join("index.json");

        let pipeline =
            RagPipeline::from_config(&config, Arc::new(LetterEmbedder), Arc::new(CountingGenerator))
                .unwrap();
        assert_eq!(pipeline.store_path(), Some(config.store.path.as_path()));

        let report = pipeline
            .index_text("abcdefghijklmnopqrstuvwxyz", Metadata::new())
            .await
            .unwrap();
        // Windows start at 0, 8, 16; the last one reaches the end.
        assert_eq!(report.chunks, 3);
        assert!(config.store.path.exists());
    }

    #[tokio::test]
    async fn test_invalid_chunking_config_is_rejected() {
        let mut config = SiftConfig::default();
        config.chunking.overlap = config.chunking.chunk_size;
        assert!(
            RagPipeline::from_config(&config, Arc::new(LetterEmbedder), Arc::new(CountingGenerator))
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_concurrent_queries_share_the_index() {
        let pipeline = Arc::new(RagPipeline::new(
            Box::new(RecursiveSplitter::new(SplitterConfig::new(100, 0).unwrap())),
            Arc::new(LetterEmbedder),
            Arc::new(CountingGenerator),
        ));
        for text in ["alpha beta", "gamma delta", "epsilon zeta"] {
            pipeline.index_text(text, Metadata::new()).await.unwrap();
        }

        let mut handles = Vec::new();
        for question in ["alpha", "delta", "zeta", "beta"] {
            let pipeline = Arc::clone(&pipeline);
            handles.push(tokio::spawn(async move {
                pipeline.retrieve(question, 3).await
            }));
        }
        for handle in handles {
            let chunks = handle.await.unwrap().unwrap();
            assert_eq!(chunks.len(), 3);
        }
    }
}
